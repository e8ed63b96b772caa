//! Integration tests for the chat and suggestion call sites.
//!
//! All tests run against mock transports; no network access is needed.
//!
//! Run with:
//!   cargo test -p orchestrator --test call_sites

use std::sync::Arc;

use mock_transport::{responses, DelayedTransport, GatedTransport, ScriptedTransport};
use orchestrator::{
    ChatSession, ChatSite, DocumentSnapshot, EditorAssist, ErrorKind, Role, SuggestionSite,
    TransportFault, Turn, GREETING,
};

// ============================================================================
// Chat call site
// ============================================================================

mod chat_tests {
    use super::*;

    #[tokio::test]
    async fn test_first_message_payload_and_reply() {
        let site = ChatSite::new(ScriptedTransport::new().respond(responses::text("Hello!")));

        let reply = site.chat_with_ai("Hi", &[]).await.unwrap();
        assert_eq!(reply, "Hello!");

        let sent = site.orchestrator().transport().sent_requests();
        let payload = serde_json_value(&sent[0]);
        assert_eq!(
            payload,
            serde_json::json!({ "contents": [{ "role": "user", "parts": [{ "text": "Hi" }] }] })
        );
    }

    #[tokio::test]
    async fn test_history_roles_and_order() {
        let site = ChatSite::new(ScriptedTransport::new().respond(responses::text("D")));
        let history = vec![Turn::author("A"), Turn::assistant("B")];

        site.chat_with_ai("C", &history).await.unwrap();

        let sent = site.orchestrator().transport().sent_requests();
        let roles: Vec<&str> = sent[0].contents.iter().map(|c| c.role.as_str()).collect();
        let texts: Vec<&str> = sent[0]
            .contents
            .iter()
            .map(|c| c.parts[0].text.as_str())
            .collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(texts, vec!["A", "B", "C"]);
        // Caller's history untouched
        assert_eq!(history, vec![Turn::author("A"), Turn::assistant("B")]);
    }

    #[tokio::test]
    async fn test_service_error_becomes_warning_turn() {
        let site = Arc::new(ChatSite::new(
            ScriptedTransport::new().respond(responses::error("quota exceeded")),
        ));
        let mut session = ChatSession::new(site);

        session.send_message("Hi").await;

        let last = session.transcript().last().unwrap();
        assert_eq!(last.role(), Role::Assistant);
        assert_eq!(last.text(), "⚠️ quota exceeded");
    }

    #[tokio::test]
    async fn test_transport_fault_becomes_warning_turn() {
        let site = Arc::new(ChatSite::new(
            ScriptedTransport::new().fail(TransportFault::Network("connection reset".into())),
        ));
        let mut session = ChatSession::new(site);

        let reply = session.send_message("Hi").await.cloned().unwrap();

        assert_eq!(reply.text(), "⚠️ Network error: connection reset");
        assert_eq!(
            session.site().last_error().map(|e| e.kind),
            Some(ErrorKind::TransportFault)
        );
    }

    #[tokio::test]
    async fn test_multi_turn_conversation_grows_in_order() {
        let site = Arc::new(ChatSite::new(
            ScriptedTransport::new()
                .respond(responses::text("first reply"))
                .respond(responses::error("quota exceeded"))
                .respond(responses::text("third reply")),
        ));
        let mut session = ChatSession::new(site);

        session.send_message("one").await;
        session.send_message("two").await;
        session.send_message("three").await;

        let texts: Vec<&str> = session.transcript().iter().map(Turn::text).collect();
        assert_eq!(
            texts,
            vec![
                GREETING,
                "one",
                "first reply",
                "two",
                "⚠️ quota exceeded",
                "three",
                "third reply",
            ]
        );

        // The third request carried the whole prior transcript, warning turn included.
        let sent = session.site().orchestrator().transport().sent_requests();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[2].contents.len(), 6);
        assert_eq!(sent[2].contents[4].parts[0].text, "⚠️ quota exceeded");
    }
}

// ============================================================================
// Single-flight and busy flag
// ============================================================================

mod single_flight_tests {
    use super::*;

    #[tokio::test]
    async fn test_second_chat_call_rejected_while_first_pending() {
        let site = ChatSite::new(GatedTransport::new(
            ScriptedTransport::new().respond(responses::text("first")),
        ));
        let history = vec![Turn::author("A"), Turn::assistant("B")];

        let first = site.chat_with_ai("C", &history);
        let second = async {
            site.orchestrator().transport().wait_for_request().await;
            let rejected = site.chat_with_ai("D", &history).await;
            site.orchestrator().transport().release();
            rejected
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap(), "first");
        assert_eq!(second.unwrap_err().kind, ErrorKind::Busy);

        // Only the first request reached the service, with history intact.
        let sent = site.orchestrator().transport().inner().sent_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].contents.len(), 3);
        assert_eq!(sent[0].contents[2].parts[0].text, "C");
        assert!(site.last_error().is_none());
    }

    #[tokio::test]
    async fn test_shared_site_busy_leaves_other_transcript_untouched() {
        let site = Arc::new(ChatSite::new(GatedTransport::new(
            ScriptedTransport::new().respond(responses::text("reply")),
        )));
        let mut first_session = ChatSession::new(site.clone());
        let mut second_session = ChatSession::new(site.clone());

        let first = first_session.send_message("one");
        let second = async {
            site.orchestrator().transport().wait_for_request().await;
            let rejected = second_session.send_message("two").await.cloned();
            site.orchestrator().transport().release();
            (rejected, second_session.transcript().len())
        };

        let (first, (rejected, second_len)) = tokio::join!(first, second);

        assert_eq!(first.map(|t| t.text().to_string()).as_deref(), Some("reply"));
        assert!(rejected.is_none());
        assert_eq!(second_len, 1);
    }

    #[tokio::test]
    async fn test_busy_cleared_after_every_outcome() {
        let site = ChatSite::new(
            ScriptedTransport::new()
                .respond(responses::text("ok"))
                .respond(responses::empty())
                .fail(TransportFault::Status {
                    status: 500,
                    body: String::new(),
                })
                .respond(responses::error("quota exceeded")),
        );

        let results = [
            site.chat_with_ai("1", &[]).await,
            site.chat_with_ai("2", &[]).await,
            site.chat_with_ai("3", &[]).await,
            site.chat_with_ai("4", &[]).await,
        ];
        assert!(!site.is_busy());

        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert_eq!(results[2].as_ref().unwrap_err().kind, ErrorKind::TransportFault);
        assert_eq!(results[3].as_ref().unwrap_err().kind, ErrorKind::ServiceError);
    }

    #[tokio::test]
    async fn test_busy_observed_only_while_in_flight() {
        let site = SuggestionSite::new(DelayedTransport::with_millis(
            ScriptedTransport::new().respond(responses::text("slow")),
            50,
        ));

        let request = site.generate_suggestion("text");
        let observer = async {
            tokio::task::yield_now().await;
            site.is_busy()
        };

        let (suggestion, busy_during) = tokio::join!(request, observer);

        assert!(busy_during);
        assert_eq!(suggestion.as_deref(), Some("slow"));
        assert!(!site.is_busy());
    }

    #[tokio::test]
    async fn test_chat_and_suggestion_sites_are_independent() {
        let chat = ChatSite::new(GatedTransport::new(
            ScriptedTransport::new().respond(responses::text("chat")),
        ));
        let suggestions =
            SuggestionSite::new(ScriptedTransport::new().respond(responses::text("idea")));

        let chatting = chat.chat_with_ai("Hi", &[]);
        let suggesting = async {
            chat.orchestrator().transport().wait_for_request().await;
            assert!(chat.is_busy());
            assert!(!suggestions.is_busy());
            let idea = suggestions.generate_suggestion("Draft").await;
            chat.orchestrator().transport().release();
            idea
        };

        let (reply, idea) = tokio::join!(chatting, suggesting);

        assert_eq!(reply.unwrap(), "chat");
        assert_eq!(idea.as_deref(), Some("idea"));
    }
}

// ============================================================================
// Suggestion call site
// ============================================================================

mod suggestion_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_candidates_resolve_to_none() {
        let site = SuggestionSite::new(ScriptedTransport::new().respond(responses::empty()));

        assert_eq!(site.generate_suggestion("Some text").await, None);
        assert!(site.error().is_none());
    }

    #[tokio::test]
    async fn test_single_shot_ignores_chat_history() {
        let chat = ChatSite::new(ScriptedTransport::new().respond(responses::text("reply")));
        let suggestions =
            SuggestionSite::new(ScriptedTransport::new().respond(responses::text("idea")));
        let history = vec![Turn::author("A"), Turn::assistant("B")];

        chat.chat_with_ai("C", &history).await.unwrap();
        suggestions.generate_suggestion("Polish this.").await;

        let sent = suggestions.orchestrator().transport().sent_requests();
        assert_eq!(sent[0].contents.len(), 1);
        assert_eq!(sent[0].contents[0].parts[0].text, "Polish this.");
    }

    #[tokio::test]
    async fn test_error_side_channel_clears_on_next_request() {
        let site = SuggestionSite::new(
            ScriptedTransport::new()
                .respond(responses::error("quota exceeded"))
                .respond(responses::text("idea")),
        );

        assert_eq!(site.generate_suggestion("x").await, None);
        assert_eq!(site.error().as_deref(), Some("quota exceeded"));

        assert_eq!(site.generate_suggestion("x").await.as_deref(), Some("idea"));
        assert!(site.error().is_none());
    }

    #[tokio::test]
    async fn test_editor_suggests_on_whole_document_without_selection() {
        let site = SuggestionSite::new(ScriptedTransport::new().respond(responses::text("idea")));
        let mut editor = EditorAssist::new(site);
        let doc = DocumentSnapshot::new("Welcome to Your Collaborative Editor!");

        assert_eq!(editor.request_suggestion(&doc).await.as_deref(), Some("idea"));
        assert_eq!(editor.suggestion(), Some("idea"));

        let sent = editor.site().orchestrator().transport().sent_requests();
        assert_eq!(
            sent[0].contents[0].parts[0].text,
            "Welcome to Your Collaborative Editor!"
        );
    }
}

fn serde_json_value(request: &assist_core::GenerateContentRequest) -> serde_json::Value {
    serde_json::to_value(request).unwrap()
}
