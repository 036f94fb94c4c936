pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn envelope_skips_absent_fields() {
        let body = serde_json::to_value(types::ApiResponse::ok("x")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], "x");
        assert!(body.get("count").is_none());
        assert!(body.get("message").is_none());
        assert!(body.get("error").is_none());
    }

    #[test]
    fn envelope_failure_carries_message_and_error() {
        let body = serde_json::to_value(types::ApiResponse::<()>::failure(
            "Error retrieving books",
            Some("disk on fire".into()),
        ))
        .unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Error retrieving books");
        assert_eq!(body["error"], "disk on fire");
        assert!(body.get("data").is_none());
    }
}
