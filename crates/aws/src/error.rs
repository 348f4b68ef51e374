//! Mapping of SDK failures onto cloudcall errors
//!
//! Service errors are classified by their error code; transport failures
//! (timeouts, dispatch failures, unreadable responses) are network errors.

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use cloudcall_core::Error;

/// Convert an SDK error into a cloudcall error
///
/// `subject` names what the call was about (alarm names, `bucket/key`) and is
/// used as the not-found message.
pub(crate) fn from_sdk_error<E, R>(err: SdkError<E, R>, subject: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let detail = DisplayErrorContext(&err).to_string();
    tracing::debug!(subject, error = %detail, "SDK call failed");

    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            Error::Network(detail)
        }
        SdkError::ServiceError(context) => classify(context.err().code(), subject, detail),
        _ => Error::General(detail),
    }
}

/// Classify a service error code
pub(crate) fn classify(code: Option<&str>, subject: &str, detail: String) -> Error {
    let Some(code) = code else {
        return Error::General(detail);
    };

    match code {
        "ResourceNotFound"
        | "ResourceNotFoundException"
        | "NotFoundException"
        | "NotFound"
        | "NoSuchKey"
        | "NoSuchBucket" => Error::NotFound(subject.to_string()),

        "AccessDenied"
        | "AccessDeniedException"
        | "AllAccessDisabled"
        | "InvalidAccessKeyId"
        | "InvalidClientTokenId"
        | "UnrecognizedClientException"
        | "SignatureDoesNotMatch"
        | "MissingAuthenticationToken"
        | "ExpiredToken"
        | "ExpiredTokenException" => Error::Auth(detail),

        "Throttling"
        | "ThrottlingException"
        | "ThrottledException"
        | "TooManyRequestsException"
        | "RequestLimitExceeded"
        | "SlowDown" => Error::Throttled(detail),

        "InvalidCiphertextException" | "IncorrectKeyException" | "InvalidKeyUsageException" => {
            Error::InvalidCiphertext(detail)
        }

        "InternalFailure"
        | "InternalError"
        | "ServiceUnavailable"
        | "KMSInternalException"
        | "DependencyTimeoutException" => Error::Network(detail),

        _ => Error::General(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::get_object::GetObjectError;
    use aws_sdk_s3::types::error::NoSuchKey;

    fn detail() -> String {
        "service error: details".to_string()
    }

    #[test]
    fn test_not_found_uses_subject() {
        let err = classify(Some("NoSuchKey"), "my_bucket/my_item", detail());
        assert!(matches!(err, Error::NotFound(ref s) if s == "my_bucket/my_item"));

        let err = classify(Some("ResourceNotFound"), "Unknown_Alarm", detail());
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_auth_codes() {
        for code in ["AccessDenied", "AccessDeniedException", "ExpiredToken"] {
            assert!(matches!(classify(Some(code), "x", detail()), Error::Auth(_)));
        }
    }

    #[test]
    fn test_throttling_codes() {
        let err = classify(Some("Throttling"), "x", detail());
        assert!(matches!(err, Error::Throttled(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_kms_ciphertext_codes() {
        let err = classify(Some("InvalidCiphertextException"), "x", detail());
        assert!(matches!(err, Error::InvalidCiphertext(_)));

        let err = classify(Some("IncorrectKeyException"), "x", detail());
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn test_unknown_or_missing_code() {
        let err = classify(Some("SomethingNew"), "x", detail());
        assert!(matches!(err, Error::General(ref s) if s == "service error: details"));

        assert!(matches!(classify(None, "x", detail()), Error::General(_)));
    }

    #[test]
    fn test_sdk_service_error_uses_code() {
        let err: SdkError<GetObjectError, ()> = SdkError::service_error(
            GetObjectError::NoSuchKey(
                NoSuchKey::builder()
                    .meta(ErrorMetadata::builder().code("NoSuchKey").build())
                    .build(),
            ),
            (),
        );
        let err = from_sdk_error(err, "my_bucket/my_item");
        assert!(matches!(err, Error::NotFound(ref s) if s == "my_bucket/my_item"));
    }

    #[test]
    fn test_sdk_service_error_without_code() {
        let err: SdkError<GetObjectError, ()> = SdkError::service_error(
            GetObjectError::generic(ErrorMetadata::builder().message("no code").build()),
            (),
        );
        assert!(matches!(from_sdk_error(err, "x"), Error::General(_)));
    }

    #[test]
    fn test_sdk_timeout_is_network() {
        let err: SdkError<GetObjectError, ()> = SdkError::timeout_error("operation timed out");
        let err = from_sdk_error(err, "my_bucket/my_item");
        assert!(matches!(err, Error::Network(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_sdk_construction_failure_is_general() {
        let err: SdkError<GetObjectError, ()> =
            SdkError::construction_failure("missing required field");
        assert!(matches!(from_sdk_error(err, "x"), Error::General(_)));
    }
}
