use clap::Parser;

mod app;
mod args;
mod input;
mod scene;
mod scenes;
mod screenshot;

use app::{App, AppError};
use args::Args;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = args.config()?;

    let app = App::new(&config, args.demo.title())?;
    let demo = scene::build(args.demo, &config)?;

    app.run(demo)
}
