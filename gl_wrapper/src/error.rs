use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GlErrorCode {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    InvalidFramebufferOperation,
    Unknown(u32),
}

impl GlErrorCode {
    pub fn from_raw(code: u32) -> Self {
        match code {
            gl::INVALID_ENUM => Self::InvalidEnum,
            gl::INVALID_VALUE => Self::InvalidValue,
            gl::INVALID_OPERATION => Self::InvalidOperation,
            gl::STACK_OVERFLOW => Self::StackOverflow,
            gl::STACK_UNDERFLOW => Self::StackUnderflow,
            gl::OUT_OF_MEMORY => Self::OutOfMemory,
            gl::INVALID_FRAMEBUFFER_OPERATION => Self::InvalidFramebufferOperation,
            other => Self::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidEnum => "INVALID_ENUM",
            Self::InvalidValue => "INVALID_VALUE",
            Self::InvalidOperation => "INVALID_OPERATION",
            Self::StackOverflow => "STACK_OVERFLOW",
            Self::StackUnderflow => "STACK_UNDERFLOW",
            Self::OutOfMemory => "OUT_OF_MEMORY",
            Self::InvalidFramebufferOperation => "INVALID_FRAMEBUFFER_OPERATION",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl Display for GlErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "UNKNOWN (0x{code:x})"),
            known => f.write_str(known.name()),
        }
    }
}

/// Drains the driver error queue, logging each entry against `operation`.
pub fn check_errors(operation: &str) -> Vec<GlErrorCode> {
    let mut errors = Vec::new();

    loop {
        let code = unsafe { gl::GetError() };
        if code == gl::NO_ERROR {
            break;
        }

        let err = GlErrorCode::from_raw(code);
        log::warn!("OpenGL error after {operation}: {err}");
        errors.push(err);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(GlErrorCode::from_raw(0x0500), GlErrorCode::InvalidEnum);
        assert_eq!(GlErrorCode::from_raw(0x0502), GlErrorCode::InvalidOperation);
        assert_eq!(GlErrorCode::from_raw(0x0505), GlErrorCode::OutOfMemory);
        assert_eq!(GlErrorCode::InvalidValue.to_string(), "INVALID_VALUE");
    }

    #[test]
    fn unknown_code_keeps_value() {
        let err = GlErrorCode::from_raw(0x1234);

        assert_eq!(err, GlErrorCode::Unknown(0x1234));
        assert_eq!(err.name(), "UNKNOWN");
        assert_eq!(err.to_string(), "UNKNOWN (0x1234)");
    }
}
