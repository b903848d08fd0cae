// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Standard errors returned by drivers and HIL implementations.

/// Standard errors.
///
/// Success is expressed with `Ok(..)` of a `Result`, so this type only
/// carries failure cases. The discriminants are stable and may be handed to
/// a host protocol layer as raw status values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ErrorCode {
    /// Underlying system is busy; retry
    BUSY = 2,
    /// An invalid parameter was passed
    INVAL = 6,
    /// Parameter passed was too large
    SIZE = 7,
    /// Operation or command is unsupported
    NOSUPPORT = 10,
}

impl From<ErrorCode> for usize {
    fn from(err: ErrorCode) -> usize {
        err as usize
    }
}

impl TryFrom<usize> for ErrorCode {
    type Error = ();

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::BUSY),
            6 => Ok(ErrorCode::INVAL),
            7 => Ok(ErrorCode::SIZE),
            10 => Ok(ErrorCode::NOSUPPORT),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_status_roundtrip() {
        for code in [
            ErrorCode::BUSY,
            ErrorCode::INVAL,
            ErrorCode::SIZE,
            ErrorCode::NOSUPPORT,
        ] {
            let raw = usize::from(code);
            assert_ne!(raw, 0);
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(0), Err(()));
        assert_eq!(ErrorCode::try_from(1), Err(()));
        assert_eq!(ErrorCode::try_from(5), Err(()));
    }
}
