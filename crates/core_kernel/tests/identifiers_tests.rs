//! Unit tests for the identifiers module

use core_kernel::{AssessmentId, CorrelationId};
use uuid::Uuid;

mod correlation_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = CorrelationId::new();
        let id2 = CorrelationId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_is_random_v4() {
        let id = CorrelationId::new();
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(CorrelationId::prefix(), "COR");
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: CorrelationId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_invalid() {
        let result: Result<CorrelationId, _> = "COR-not-a-uuid".parse();
        assert!(result.is_err());
    }
}

mod assessment_id_tests {
    use super::*;

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = AssessmentId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = AssessmentId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_display_format() {
        let id = AssessmentId::new_v7();
        assert!(id.to_string().starts_with("ASM-"));
    }

    #[test]
    fn test_prefixes_do_not_cross_parse() {
        let id = AssessmentId::new();
        // A foreign prefix is not stripped, so the whole string fails to parse
        let result: Result<CorrelationId, _> = id.to_string().parse();
        assert!(result.is_err());
    }
}
