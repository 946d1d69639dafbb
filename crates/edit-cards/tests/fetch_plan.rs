mod common;

use common::scripted::{full_metadata, image, ScriptedProvider};
use edit_cards::{plan_for, CardError, ProviderError};
use edit_proto::{EditType, Summary};

#[tokio::test]
async fn test_missing_description_plan_has_no_target() {
    let provider = ScriptedProvider::new();
    provider.push_description(Ok(Summary::new("Foo", "fr")));

    let fetched = plan_for(EditType::AddDescription, "fr", "de")
        .execute(&provider)
        .await
        .unwrap();

    assert_eq!(fetched.source.title(), "Foo");
    assert!(fetched.target.is_none());
    assert_eq!(provider.calls(), vec!["description(fr)"]);
}

#[tokio::test]
async fn test_caption_plan_uses_source_language_for_metadata() {
    let provider = ScriptedProvider::new();
    provider
        .push_caption(Ok((image("File:Bridge_at_night.jpg", "fr"), "un pont".to_string())))
        .push_metadata(Ok(Some(full_metadata())));

    let fetched = plan_for(EditType::TranslateCaption, "fr", "es")
        .execute(&provider)
        .await
        .unwrap();

    assert_eq!(
        provider.calls(),
        vec!["caption(fr,es)", "metadata(fr,File:Bridge_at_night.jpg)"]
    );
    assert_eq!(fetched.source.normalized_title(), "File:Bridge at night.jpg");
    assert_eq!(fetched.target.unwrap().language_code, "es");
}

#[tokio::test]
async fn test_pair_failure_maps_to_transport() {
    let provider = ScriptedProvider::new();
    provider.push_pair(Err(ProviderError::Status {
        service: "recommendation",
        status: 404,
    }));

    let err = plan_for(EditType::TranslateDescription, "en", "de")
        .execute(&provider)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CardError::Transport("recommendation returned status 404".to_string())
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unsupported_plan_makes_no_calls() {
    let provider = ScriptedProvider::new();
    let err = plan_for(EditType::AddCaption, "en", "de")
        .execute(&provider)
        .await
        .unwrap_err();

    assert_eq!(err, CardError::UnsupportedEditType(EditType::AddCaption));
    assert!(!err.is_retryable());
    assert!(provider.calls().is_empty());
}
