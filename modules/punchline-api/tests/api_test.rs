//! In-process HTTP tests for the evaluation routes.
//! The remote model is a ScriptedGenerator; joke files live in a temp dir.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use punchline_api::{router, AppState};
use punchline_common::JokeCatalog;
use punchline_eval::testing::ScriptedGenerator;
use punchline_eval::FunninessScorer;

// =========================================================================
// Harness
// =========================================================================

struct Harness {
    app: Router,
    cookie: Option<String>,
    _dir: Option<tempfile::TempDir>,
}

const CLASSIC: &str = r#"[
    {"id": 1, "text": "Why don't scientists trust atoms? Because they make up everything!"},
    {"id": 2, "text": "My dog used to chase people on a bike a lot. It got so bad, I had to take his darn bike away."},
    {"id": 3, "text": "Why don't scientists trust atoms? Because they make up everything!"},
    {"id": 4, "text": "What do you call a fish with no eyes? Fsh!"}
]"#;

const SPANISH: &str = r#"[
    {"id": 1, "text": "¿Qué hace una abeja en el gimnasio? ¡Zum-ba!"},
    {"id": 2, "text": "¡Esa maldita impresora otra vez!"}
]"#;

impl Harness {
    fn new(scorer: FunninessScorer) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let classic = dir.path().join("classic.json");
        let spanish = dir.path().join("spanish.json");
        let broken = dir.path().join("broken.json");
        std::fs::write(&classic, CLASSIC).unwrap();
        std::fs::write(&spanish, SPANISH).unwrap();
        std::fs::write(&broken, r#"[{"id": 1}]"#).unwrap();

        let catalog = JokeCatalog::new(
            vec![
                ("classic".to_string(), classic),
                ("spanish".to_string(), spanish),
                ("broken".to_string(), broken),
            ],
            "classic",
        )
        .unwrap();

        let state = Arc::new(AppState::new(catalog, scorer).unwrap());
        Self {
            app: router(state),
            cookie: None,
            _dir: Some(dir),
        }
    }

    fn offline() -> Self {
        Self::new(FunninessScorer::offline())
    }

    /// GET `uri` as this browser, remembering any session cookie handed out.
    async fn get(&mut self, uri: &str) -> (StatusCode, Option<String>, String) {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let response = self
            .app
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        if let Some(sc) = &set_cookie {
            let pair = sc.split(';').next().unwrap().to_string();
            self.cookie = Some(pair);
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, set_cookie, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_json(&mut self, uri: &str) -> Value {
        let (status, _, body) = self.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri} -> {body}");
        serde_json::from_str(&body).unwrap()
    }

    /// A second browser against the same server, without cookies.
    fn other_browser(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
            _dir: None,
        }
    }
}

// =========================================================================
// Page and discovery
// =========================================================================

#[tokio::test]
async fn index_serves_page_and_sets_session_cookie() {
    let mut h = Harness::offline();
    let (status, set_cookie, body) = h.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Joke Evaluator — Punchline</title>"));
    assert!(body.contains(r#"<option value="classic" selected>classic</option>"#));
    assert!(set_cookie.unwrap().starts_with("punchline_session="));

    // Cookie reused on the next request, so no new one is issued.
    let (_, again, _) = h.get("/").await;
    assert!(again.is_none());
}

#[tokio::test]
async fn responses_are_not_cacheable() {
    let h = Harness::offline();
    let response = h
        .app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
}

#[tokio::test]
async fn health_reports_service() {
    let mut h = Harness::offline();
    let body = h.get_json("/health").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "punchline");
}

#[tokio::test]
async fn available_files_lists_catalog_in_order() {
    let mut h = Harness::offline();
    let body = h.get_json("/available_joke_files").await;
    assert_eq!(body["active_file"], "classic");
    assert_eq!(
        body["available_files"],
        serde_json::json!(["classic", "spanish", "broken"])
    );
}

// =========================================================================
// Evaluation flow
// =========================================================================

#[tokio::test]
async fn mocked_run_walks_list_then_signals_end() {
    let mut h = Harness::offline();
    h.get("/").await;

    let expected = [
        (4, true, "Novel", true, "Safe"),
        (1, true, "Novel", false, "Unsafe (Reason: 'darn')"),
        (4, false, "Repeat", true, "Safe"),
        (2, true, "Novel", true, "Safe"),
    ];
    let texts: Vec<String> = serde_json::from_str::<Vec<Value>>(CLASSIC)
        .unwrap()
        .iter()
        .map(|j| j["text"].as_str().unwrap().to_string())
        .collect();

    for (i, (score, novel, novelty, safe, safety)) in expected.iter().enumerate() {
        let body = h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["joke"], texts[i].as_str());
        assert_eq!(body["novelty"]["is_novel"], *novel);
        assert_eq!(body["novelty"]["status"], *novelty);
        assert_eq!(body["safety"]["is_safe"], *safe);
        assert_eq!(body["safety"]["status"], *safety);
        assert_eq!(body["funniness"]["score"], *score);
        assert_eq!(body["funniness"]["source"], "(Mocked)");
        assert_eq!(body["funniness"]["method_used"], "mocked");
    }

    for _ in 0..3 {
        let body = h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
        assert_eq!(body["status"], "end_of_jokes");
        assert_eq!(body["message"], "No more jokes!");
    }
}

#[tokio::test]
async fn reloading_page_restarts_sequence() {
    let mut h = Harness::offline();
    h.get("/").await;
    h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    h.get_json("/evaluate_next_joke?funniness_method=mocked").await;

    h.get("/").await;
    let body = h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    assert_eq!(body["funniness"]["score"], 4);
    assert_eq!(body["novelty"]["status"], "Novel");
}

#[tokio::test]
async fn remote_method_uses_model_reply() {
    let generator = ScriptedGenerator::replying("3");
    let mut h = Harness::new(FunninessScorer::new(generator.clone()));

    let body = h.get_json("/evaluate_next_joke?funniness_method=direct_llm").await;
    assert_eq!(body["funniness"]["score"], 3);
    assert_eq!(body["funniness"]["source"], "(Direct LLM)");
    assert_eq!(generator.calls(), 1);
    assert!(generator.prompts()[0].contains("Joke: 'Why don't scientists trust atoms?"));
}

#[tokio::test]
async fn missing_method_defaults_to_direct_llm() {
    let mut h = Harness::new(FunninessScorer::new(ScriptedGenerator::replying("5")));
    let body = h.get_json("/evaluate_next_joke").await;
    assert_eq!(body["funniness"]["method_used"], "direct_llm");
    assert_eq!(body["funniness"]["score"], 5);
}

#[tokio::test]
async fn remote_failures_still_return_200() {
    let mut h = Harness::new(FunninessScorer::new(ScriptedGenerator::failing("timeout")));
    let body = h.get_json("/evaluate_next_joke?funniness_method=direct_llm").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["funniness"]["score"], 1);
    assert_eq!(body["funniness"]["source"], "(LLM Invoke Error)");

    let mut h = Harness::new(FunninessScorer::new(ScriptedGenerator::replying("7")));
    let body = h.get_json("/evaluate_next_joke?funniness_method=direct_llm").await;
    assert_eq!(body["funniness"]["score"], 1);
    assert_eq!(body["funniness"]["source"], "(LLM Format Error)");
}

#[tokio::test]
async fn unknown_method_is_echoed_with_default_score() {
    let mut h = Harness::offline();
    let body = h.get_json("/evaluate_next_joke?funniness_method=vibes").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["funniness"]["score"], 1);
    assert_eq!(body["funniness"]["source"], "(Unknown Method)");
    assert_eq!(body["funniness"]["method_used"], "vibes");
}

#[tokio::test]
async fn repeated_method_param_uses_first_value() {
    let mut h = Harness::new(FunninessScorer::new(ScriptedGenerator::replying("5")));
    let body = h
        .get_json("/evaluate_next_joke?funniness_method=mocked&funniness_method=direct_llm")
        .await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["funniness"]["method_used"], "mocked");
    assert_eq!(body["funniness"]["score"], 4);
}

// =========================================================================
// Source switching
// =========================================================================

#[tokio::test]
async fn switching_resets_cursor_and_told_set() {
    let mut h = Harness::offline();
    h.get("/").await;
    for _ in 0..4 {
        h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    }

    let body = h.get_json("/switch_joke_file/spanish").await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Switched to spanish jokes");
    assert_eq!(body["joke_count"], 2);

    let sources = h.get_json("/available_joke_files").await;
    assert_eq!(sources["active_file"], "spanish");

    let first = h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    assert_eq!(first["novelty"]["status"], "Novel");
    assert_eq!(first["safety"]["status"], "Safe");
    let second = h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    assert_eq!(second["safety"]["status"], "Unsafe (Reason: 'maldita')");
    let end = h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    assert_eq!(end["status"], "end_of_jokes");
}

#[tokio::test]
async fn unknown_source_is_reported_without_state_change() {
    let mut h = Harness::offline();
    h.get("/").await;
    h.get_json("/evaluate_next_joke?funniness_method=mocked").await;

    let body = h.get_json("/switch_joke_file/knock-knock").await;
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["message"],
        r#"Unknown joke file: knock-knock. Available options: ["classic", "spanish", "broken"]"#
    );

    let sources = h.get_json("/available_joke_files").await;
    assert_eq!(sources["active_file"], "classic");

    // Cursor still at 1 and the told-set still remembers joke 1, so joke 3 repeats.
    let second = h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    assert_eq!(second["safety"]["status"], "Unsafe (Reason: 'darn')");
    let third = h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    assert_eq!(third["novelty"]["status"], "Repeat");
}

#[tokio::test]
async fn undecodable_source_key_is_reported_as_unknown() {
    let mut h = Harness::offline();
    h.get("/").await;
    h.get_json("/evaluate_next_joke?funniness_method=mocked").await;

    let body = h.get_json("/switch_joke_file/%FF").await;
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["message"],
        r#"Unknown joke file: %FF. Available options: ["classic", "spanish", "broken"]"#
    );

    let sources = h.get_json("/available_joke_files").await;
    assert_eq!(sources["active_file"], "classic");
    let next = h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    assert_eq!(next["safety"]["status"], "Unsafe (Reason: 'darn')");
}

#[tokio::test]
async fn broken_source_falls_back_to_builtin_jokes() {
    let mut h = Harness::offline();
    let body = h.get_json("/switch_joke_file/broken").await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["joke_count"], 4);

    let first = h.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    assert_eq!(
        first["joke"],
        "Why don't scientists trust atoms? Because they make up everything!"
    );
}

// =========================================================================
// Session isolation
// =========================================================================

#[tokio::test]
async fn browsers_do_not_share_progress() {
    let mut alice = Harness::offline();
    alice.get("/").await;
    let mut bob = alice.other_browser();
    bob.get("/").await;

    alice.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    alice.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    alice.get_json("/switch_joke_file/spanish").await;

    let bob_first = bob.get_json("/evaluate_next_joke?funniness_method=mocked").await;
    assert_eq!(bob_first["novelty"]["status"], "Novel");
    assert_eq!(bob_first["funniness"]["score"], 4);

    let bob_sources = bob.get_json("/available_joke_files").await;
    assert_eq!(bob_sources["active_file"], "classic");
}
