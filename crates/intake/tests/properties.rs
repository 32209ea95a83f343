//! Property tests over whole endpoints.

use http::StatusCode;
use intake::fixtures;
use intake::prelude::*;
use intake_test::TestRequest;
use proptest::prelude::*;
use std::sync::Arc;

fn registry() -> EndpointRegistry {
    fixtures::registry().unwrap()
}

proptest! {
    #[test]
    fn any_positive_path_id_round_trips(id in 1u64..=u64::MAX) {
        let registry = registry();
        let sources = TestRequest::put(format!("/users/{id}"))
            .path_param("user_id", id.to_string())
            .into_sources();

        let outcome = registry.process("update_user", &sources).unwrap();
        prop_assert!(outcome.is_valid());
        prop_assert_eq!(
            outcome.record().and_then(|r| r.get("UserID")),
            Some(&TypedValue::UnsignedInt(id))
        );
    }

    #[test]
    fn arbitrary_query_never_panics(query in "[a-z_=&,%0-9+-]{0,64}") {
        let registry = registry();
        let sources = TestRequest::get(format!("/search?{query}")).into_sources();

        let outcome = registry.process("search", &sources).unwrap();
        let status = outcome.status_code();
        prop_assert!(
            status == StatusCode::OK
                || status == StatusCode::BAD_REQUEST
                || status == StatusCode::UNPROCESSABLE_ENTITY
        );
        prop_assert_eq!(outcome.is_valid(), outcome.errors().is_empty());
    }

    #[test]
    fn arbitrary_body_never_panics(body in proptest::collection::vec(any::<u8>(), 0..128)) {
        let validator = Arc::new(fixtures::validator().unwrap());
        let endpoint = fixtures::create_user(validator).unwrap();
        let sources = TestRequest::post("/users")
            .body(body)
            .content_type("application/json")
            .into_sources();

        let outcome = endpoint.process(&sources);
        prop_assert!(!outcome.is_valid() || outcome.record().is_some());
    }

    #[test]
    fn in_rule_accepts_exactly_its_members(tag in "[a-z]{1,10}") {
        let registry = registry();
        let sources = TestRequest::get("/search").query_param("tags", &tag).into_sources();

        let outcome = registry.process("search", &sources).unwrap();
        let member = ["tech", "sports", "politics"].contains(&tag.as_str());
        prop_assert_eq!(outcome.is_valid(), member);
    }
}
