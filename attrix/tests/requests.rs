use attrix::{
    DataValue, Method, Namespace, Param, Parameters, Phase, Response, Scope, Selector, Settings,
    TransportError,
    testing::{MemoryPage, MockTransport, Node},
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

mod common;
use common::{fixture, fixture_with};

#[tokio::test]
async fn test_box_end_to_end() {
    let mut fx = fixture(MemoryPage::new().with_element("box", Node::new("div")));

    fx.attrix.describe("#box", Parameters::new()).unwrap();
    assert_eq!(fx.page.bindings(), vec![(Scope::Document, "ready".to_string())]);

    fx.page.ready().await;

    let requests = fx.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert!(!requests[0].cache);
    assert_eq!(
        requests[0].payload.pairs(),
        vec![("op".to_string(), "box".to_string())]
    );
    assert_eq!(fx.page.html("box").as_deref(), Some("box_from_response"));
}

#[test]
fn test_auto_event_follows_tag() {
    let mut fx = fixture(
        MemoryPage::new()
            .with_element("btn", Node::new("button"))
            .with_element("link", Node::new("A"))
            .with_element("panel", Node::new("div")),
    );

    fx.attrix
        .describe(["#btn", "#link", "#panel"], Parameters::new())
        .unwrap();

    assert_eq!(
        fx.page.bindings(),
        vec![
            (Scope::Element(Selector::id("btn")), "click".to_string()),
            (Scope::Element(Selector::id("link")), "click".to_string()),
            (Scope::Document, "ready".to_string()),
        ]
    );
}

#[test]
fn test_ready_on_missing_element_is_skipped() {
    let mut fx = fixture(MemoryPage::new());

    fx.attrix.describe("#ghost", Parameters::new()).unwrap();

    assert_eq!(fx.page.listener_count(), 0);
}

#[test]
fn test_named_event_binds_on_element() {
    let mut fx = fixture(MemoryPage::new().with_element("sel", Node::new("select")));

    fx.attrix
        .describe("#sel", Parameters::new().with("event", "change"))
        .unwrap();

    assert_eq!(
        fx.page.bindings(),
        vec![(Scope::Element(Selector::id("sel")), "change".to_string())]
    );
}

#[tokio::test]
async fn test_content_actions() {
    let cases = [
        ("fill", Some("btn_from_response")),
        ("append", Some("oldbtn_from_response")),
        ("prepend", Some("btn_from_responseold")),
        ("empty", Some("")),
        ("remove", None),
        ("replace", None),
    ];

    for (action, expected) in cases {
        let mut fx = fixture(MemoryPage::new().with_element("btn", Node::new("button").html("old")));
        fx.attrix
            .describe("#btn", Parameters::new().with("success", action))
            .unwrap();

        fx.page.trigger("#btn", "click").await;

        assert_eq!(fx.page.html("btn").as_deref(), expected, "action `{action}`");
        if action == "replace" {
            assert_eq!(
                fx.page.replacements(),
                vec![(Selector::id("btn"), "btn_from_response".to_string())]
            );
        }
    }
}

#[tokio::test]
async fn test_data_attributes_configure_and_accompany_request() {
    let page = MemoryPage::new().with_element(
        "btn",
        Node::new("button")
            .data("xmethod", "POST")
            .data("xop", "save")
            .data("xcolor", "red")
            .data("count", 2i64),
    );
    let mut fx = fixture(page);

    fx.attrix.describe("#btn", Parameters::new()).unwrap();
    fx.page.set_data("btn", "xcolor", "blue");
    fx.page.trigger("#btn", "click").await;

    let request = &fx.transport.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.payload.op(), "save");
    assert_eq!(request.payload.get("color"), Some(&DataValue::from("blue")));
    assert_eq!(request.payload.get("count"), Some(&DataValue::from(2i64)));
    assert_eq!(fx.page.html("btn").as_deref(), Some("save_from_response"));
}

#[tokio::test]
async fn test_caller_parameters_beat_data_attributes() {
    let page = MemoryPage::new().with_element(
        "btn",
        Node::new("button").data("xop", "from_data").data("xmethod", "POST"),
    );
    let mut fx = fixture(page);

    fx.attrix
        .describe(
            "#btn",
            Parameters::new().with("op", "explicit").with("method", "PUT"),
        )
        .unwrap();
    fx.page.trigger("#btn", "click").await;

    let request = &fx.transport.requests()[0];
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.payload.op(), "explicit");
}

#[tokio::test]
async fn test_canceled_before_sends_nothing() {
    let mut fx = fixture(MemoryPage::new().with_element("btn", Node::new("button").html("old")));
    fx.page.on_lifecycle("#btn", |event| {
        if event.phase() == Phase::Before {
            event.cancel();
        }
    });

    fx.attrix.describe("#btn", Parameters::new()).unwrap();
    let trigger = fx.page.trigger("#btn", "click").await;

    assert_eq!(fx.transport.count(), 0);
    assert!(!trigger.is_default_prevented());
    assert_eq!(fx.page.html("btn").as_deref(), Some("old"));
    assert_eq!(
        fx.page.lifecycle_log(),
        vec![(Selector::id("btn"), Phase::Before)]
    );
}

#[tokio::test]
async fn test_before_observer_sees_payload_and_form() {
    let page = MemoryPage::new()
        .with_element("btn", Node::new("button").data("xcolor", "red"))
        .with_element("f", Node::new("form").form([("q", "rust")]).valid(true));
    let mut fx = fixture(page);

    let seen = Arc::new(Mutex::new(None));
    let sink = seen.clone();
    fx.page.on_lifecycle("#btn", move |event| {
        if let Some(payload) = event.payload() {
            *sink.lock().unwrap() = Some((payload.clone(), event.form_fields().to_vec()));
        }
    });

    fx.attrix
        .describe("#btn", Parameters::new().with("form", "f"))
        .unwrap();
    fx.page.trigger("#btn", "click").await;

    let (payload, form) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(payload.op(), "btn");
    assert_eq!(payload.get("color"), Some(&DataValue::from("red")));
    assert_eq!(form, vec![("q".to_string(), "rust".to_string())]);
}

#[tokio::test]
async fn test_invalid_form_aborts_and_valid_form_is_sent() {
    let page = MemoryPage::new()
        .with_element("btn", Node::new("button"))
        .with_element("f", Node::new("form").form([("q", "rust lang")]).valid(false));
    let mut fx = fixture(page);

    fx.attrix
        .describe("#btn", Parameters::new().with("form", "f"))
        .unwrap();

    fx.page.trigger("#btn", "click").await;
    assert_eq!(fx.transport.count(), 0);
    assert!(fx.page.lifecycle_log().is_empty());

    fx.page.set_valid("f", true);
    let trigger = fx.page.trigger("#btn", "click").await;

    let request = &fx.transport.requests()[0];
    assert_eq!(
        request.payload.form_fields(),
        &[("q".to_string(), "rust lang".to_string())]
    );
    assert_eq!(request.query(), "op=btn&q=rust+lang");
    assert!(trigger.is_default_prevented());
}

#[tokio::test]
async fn test_form_given_as_element() {
    let page = MemoryPage::new()
        .with_element("btn", Node::new("button"))
        .with_element("f", Node::new("form").form([("a", "1")]));
    let mut fx = fixture(page);

    fx.attrix
        .describe("#btn", Parameters::new().with("form", Selector::id("f")))
        .unwrap();
    fx.page.trigger("#btn", "click").await;

    assert_eq!(fx.transport.requests()[0].query(), "op=btn&a=1");
}

#[tokio::test]
async fn test_error_status_routes_to_error_callable() {
    let failures = Arc::new(Mutex::new(Vec::new()));
    let sink = failures.clone();
    let completes = Arc::new(AtomicUsize::new(0));
    let counter = completes.clone();

    let mut fx = fixture_with(
        MemoryPage::new().with_element("btn", Node::new("button").html("old")),
        MockTransport::with_responder(|_| Ok(Response::new(500, "boom"))),
        Namespace::new(),
        Settings::new(),
    );

    fx.attrix
        .describe(
            "#btn",
            Parameters::new()
                .with(
                    "error",
                    Param::error(move |failure| {
                        sink.lock()
                            .unwrap()
                            .push((failure.status, failure.body.to_owned()));
                    }),
                )
                .with(
                    "complete",
                    Param::complete(move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }),
                ),
        )
        .unwrap();
    fx.page.trigger("#btn", "click").await;

    assert_eq!(
        *failures.lock().unwrap(),
        vec![(Some(500), "boom".to_string())]
    );
    assert_eq!(completes.load(Ordering::SeqCst), 1);
    assert_eq!(fx.page.html("btn").as_deref(), Some("old"));
    assert_eq!(
        fx.page.lifecycle_log(),
        vec![
            (Selector::id("btn"), Phase::Before),
            (Selector::id("btn"), Phase::After),
        ]
    );
}

#[tokio::test]
async fn test_network_failure_routes_to_error_callable() {
    let statuses = Arc::new(Mutex::new(Vec::new()));
    let sink = statuses.clone();

    let mut fx = fixture_with(
        MemoryPage::new().with_element("btn", Node::new("button")),
        MockTransport::with_responder(|_| Err(TransportError::network("connection refused"))),
        Namespace::new(),
        Settings::new(),
    );

    fx.attrix
        .describe(
            "#btn",
            Parameters::new().with(
                "error",
                Param::error(move |failure| {
                    sink.lock()
                        .unwrap()
                        .push((failure.status, failure.error.message.clone()));
                }),
            ),
        )
        .unwrap();
    fx.page.trigger("#btn", "click").await;

    assert_eq!(
        *statuses.lock().unwrap(),
        vec![(None, "connection refused".to_string())]
    );
}

#[tokio::test]
async fn test_target_id_is_looked_up_at_response_time() {
    let mut fx = fixture(MemoryPage::new().with_element("btn", Node::new("button")));

    fx.attrix
        .describe("#btn", Parameters::new().with("target", "later"))
        .unwrap();
    fx.page.insert("later", Node::new("div"));
    fx.page.trigger("#btn", "click").await;

    assert_eq!(fx.page.html("later").as_deref(), Some("btn_from_response"));
    assert_eq!(fx.page.html("btn").as_deref(), Some(""));
}

#[tokio::test]
async fn test_missing_target_is_tolerated() {
    let mut fx = fixture(MemoryPage::new().with_element("btn", Node::new("button").html("old")));

    fx.attrix
        .describe("#btn", Parameters::new().with("target", "nowhere"))
        .unwrap();
    fx.page.trigger("#btn", "click").await;

    assert_eq!(fx.transport.count(), 1);
    assert_eq!(fx.page.html("btn").as_deref(), Some("old"));
    assert!(!fx.page.contains("nowhere"));
}

#[tokio::test]
async fn test_custom_target_producer() {
    let page = MemoryPage::new()
        .with_element("btn", Node::new("button"))
        .with_element("btn-out", Node::new("div"));
    let mut fx = fixture(page);

    fx.attrix
        .describe(
            "#btn",
            Parameters::new().with(
                "target",
                Param::target(|element| {
                    element.id_part().map(|id| Selector::id(&format!("{id}-out")))
                }),
            ),
        )
        .unwrap();
    fx.page.trigger("#btn", "click").await;

    assert_eq!(fx.page.html("btn-out").as_deref(), Some("btn_from_response"));
}

#[tokio::test]
async fn test_each_binding_keeps_its_own_parameters() {
    let page = MemoryPage::new()
        .with_element("one", Node::new("button").data("xop", "first"))
        .with_element("two", Node::new("button"));
    let mut fx = fixture(page);

    fx.attrix
        .describe(["#one", "#two"], Parameters::new())
        .unwrap();
    fx.page.trigger("#two", "click").await;
    fx.page.trigger("#one", "click").await;

    let ops: Vec<String> = fx
        .transport
        .requests()
        .iter()
        .map(|r| r.payload.op().to_owned())
        .collect();
    assert_eq!(ops, vec!["two".to_string(), "first".to_string()]);
}

#[tokio::test]
async fn test_before_observer_can_adjust_payload() {
    let mut fx = fixture(MemoryPage::new().with_element("btn", Node::new("button")));
    fx.page.on_lifecycle("#btn", |event| {
        if let Some(payload) = event.payload_mut() {
            payload.extend_form([("token".to_string(), "abc".to_string())]);
        }
    });

    fx.attrix.describe("#btn", Parameters::new()).unwrap();
    fx.page.trigger("#btn", "click").await;

    assert_eq!(fx.transport.requests()[0].query(), "op=btn&token=abc");
}

#[tokio::test]
async fn test_data_attributes_never_fail_describe() {
    let page = MemoryPage::new()
        .with_element(
            "btn",
            Node::new("button")
                .data("method", "card")
                .data("xevent", true)
                .data("xtarget", 42i64),
        )
        .with_element("42", Node::new("div"));
    let mut fx = fixture(page);

    fx.attrix.describe("#btn", Parameters::new()).unwrap();
    fx.page.trigger("#btn", "click").await;

    let request = &fx.transport.requests()[0];
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.payload.get("method"), Some(&DataValue::from("card")));
    assert_eq!(fx.page.html("42").as_deref(), Some("btn_from_response"));
}

#[tokio::test]
async fn test_form_id_may_carry_hash() {
    let page = MemoryPage::new()
        .with_element("search", Node::new("button"))
        .with_element("search-form", Node::new("form").form([("q", "rust")]));
    let mut fx = fixture(page);

    fx.attrix
        .describe("#search", Parameters::new().with("form", "#search-form"))
        .unwrap();
    fx.page.trigger("#search", "click").await;

    assert_eq!(fx.transport.requests()[0].query(), "op=search&q=rust");
}
