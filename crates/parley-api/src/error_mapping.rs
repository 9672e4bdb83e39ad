// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

#[must_use]
pub fn map_error_status(error: &ApiError) -> u16 {
    match error.code {
        ApiErrorCode::ValidationFailed => 400,
        ApiErrorCode::NotFound => 404,
        ApiErrorCode::Conflict => 409,
        ApiErrorCode::Internal => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn every_code_maps_to_its_status_class() {
        let cases = [
            (ApiErrorCode::ValidationFailed, 400),
            (ApiErrorCode::NotFound, 404),
            (ApiErrorCode::Conflict, 409),
            (ApiErrorCode::Internal, 500),
        ];
        for (code, status) in cases {
            let err = ApiError::new(code, "x", Value::Null);
            assert_eq!(map_error_status(&err), status);
        }
    }
}
