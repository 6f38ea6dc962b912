use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::DEFAULT_CONTENT_TYPE;
use crate::error::AppError;

/// Request to authorize a direct upload
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Original filename; directory components are discarded
    #[serde(default)]
    pub filename: Option<String>,
    /// Content type (MIME type) the upload URL is issued for
    #[serde(default)]
    pub content_type: Option<String>,
}

impl UploadRequest {
    /// Parse a raw request body.
    ///
    /// An empty (or whitespace-only) body is treated as `{}`, so it fails later on the
    /// missing filename rather than as malformed JSON.
    pub fn from_json_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|_| AppError::InvalidInput("Invalid JSON body".to_string()))?;
        if !value.is_object() {
            return Err(AppError::InvalidInput("Invalid JSON body".to_string()));
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::InvalidInput(format!("Invalid request body: {}", e)))
    }

    /// The requested filename, rejecting a missing or empty value.
    pub fn filename(&self) -> Result<&str, AppError> {
        match self.filename.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(AppError::InvalidInput("filename is required".to_string())),
        }
    }

    /// The requested content type, or `application/octet-stream`.
    pub fn content_type(&self) -> &str {
        match self.content_type.as_deref() {
            Some(content_type) if !content_type.is_empty() => content_type,
            _ => DEFAULT_CONTENT_TYPE,
        }
    }
}

/// Upload authorization returned to the client
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Key the object will be stored under; pass it to `GET /files/{objectKey}`
    pub object_key: String,
    /// Presigned URL to `PUT` the file to
    pub upload_url: String,
    /// Upload URL expiration time
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_request_camel_case() {
        let req: UploadRequest = serde_json::from_str(
            r#"{"filename":"report.pdf","contentType":"application/pdf"}"#,
        )
        .unwrap();
        assert_eq!(req.filename().unwrap(), "report.pdf");
        assert_eq!(req.content_type(), "application/pdf");
    }

    #[test]
    fn test_upload_request_defaults_content_type() {
        let req: UploadRequest = serde_json::from_str(r#"{"filename":"a.bin"}"#).unwrap();
        assert_eq!(req.content_type(), "application/octet-stream");

        let req: UploadRequest =
            serde_json::from_str(r#"{"filename":"a.bin","contentType":""}"#).unwrap();
        assert_eq!(req.content_type(), "application/octet-stream");
    }

    #[test]
    fn test_upload_request_filename_required() {
        for body in [r#"{}"#, r#"{"filename":null}"#, r#"{"filename":""}"#] {
            let req: UploadRequest = serde_json::from_str(body).unwrap();
            match req.filename() {
                Err(AppError::InvalidInput(msg)) => assert_eq!(msg, "filename is required"),
                other => panic!("Expected InvalidInput for {}, got {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_from_json_body_empty_is_missing_filename() {
        for body in [&b""[..], b"   \n"] {
            let req = UploadRequest::from_json_body(body).unwrap();
            assert!(req.filename().is_err());
        }
    }

    #[test]
    fn test_from_json_body_rejects_malformed_and_non_objects() {
        for body in [&b"{not json"[..], b"[1,2]", b"\"report.pdf\"", b"null"] {
            match UploadRequest::from_json_body(body) {
                Err(AppError::InvalidInput(msg)) => assert_eq!(msg, "Invalid JSON body"),
                other => panic!("Expected InvalidInput, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_from_json_body_rejects_wrong_field_types() {
        match UploadRequest::from_json_body(br#"{"filename":42}"#) {
            Err(AppError::InvalidInput(msg)) => assert!(msg.starts_with("Invalid request body:")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_body_ignores_unknown_fields() {
        let req =
            UploadRequest::from_json_body(br#"{"filename":"a.txt","size":12,"extra":true}"#)
                .unwrap();
        assert_eq!(req.filename().unwrap(), "a.txt");
    }

    #[test]
    fn test_upload_response_shape() {
        let response = UploadResponse {
            object_key: "abcDEF123456_report.pdf".to_string(),
            upload_url: "https://bucket.s3.amazonaws.com/abcDEF123456_report.pdf?X-Amz-Expires=300"
                .to_string(),
            expires_at: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["objectKey"], "abcDEF123456_report.pdf");
        assert!(json["uploadUrl"].as_str().is_some());
        assert!(json["expiresAt"].as_str().is_some());
    }
}
