#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    InvalidRoot = 1,
    InvalidArguments = 2,
    InputError = 3,
    GeneralError = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success as i32, 0);
        assert_eq!(ExitCode::InvalidRoot as i32, 1);
        assert_eq!(ExitCode::InvalidArguments as i32, 2);
        assert_eq!(ExitCode::InputError as i32, 3);
        assert_eq!(ExitCode::GeneralError as i32, 4);
    }

    #[test]
    fn test_exit_code_into_i32() {
        let code: i32 = ExitCode::InvalidRoot.into();
        assert_eq!(code, 1);
    }
}
