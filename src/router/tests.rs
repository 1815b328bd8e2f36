use super::{component_call, Router};
use crate::component::ComponentDescriptor;
use crate::error::DispatchError;
use crate::ewc::{ActionResult, Ewc};
use crate::registry::Registry;
use serde_json::json;

fn registry() -> Registry {
    Registry::builder()
        .component(
            ComponentDescriptor::builder("blog")
                .action("index", 1, |_| Ok(ActionResult::Data(json!("index"))))
                .action("show", 2, |_| Ok(ActionResult::Data(json!("show/2"))))
                .action("show", 3, |_| Ok(ActionResult::Data(json!("show/3")))),
        )
        .build()
        .unwrap()
}

fn call_of(ewc: Ewc) -> (String, String, usize, Vec<serde_json::Value>) {
    match ewc {
        Ewc::ComponentCall(call) => (
            call.component.name().to_string(),
            call.action.name().to_string(),
            call.action.arity(),
            call.params.to_vec(),
        ),
        other => panic!("expected component call, got {other:?}"),
    }
}

#[test]
fn test_segments_below_app_root() {
    assert_eq!(
        Router::routable_segments("/app/blog/show/1", "/app").as_slice(),
        &["blog", "show", "1"]
    );
    assert_eq!(
        Router::routable_segments("/app/blog/?q=1", "/app/").as_slice(),
        &["blog"]
    );
    assert!(Router::routable_segments("/app", "/app").is_empty());
    // "/application" is not below "/app"
    assert_eq!(
        Router::routable_segments("/application/x", "/app").as_slice(),
        &["application", "x"]
    );
}

#[test]
fn test_root_path_serves_index_page() {
    let router = Router::default();
    let resolved = router.resolve("/", "/", &registry()).unwrap();
    assert!(matches!(resolved, Ewc::Page(ref p) if p == "/index.html"));
}

#[test]
fn test_single_segment_uses_default_action() {
    let router = Router::default();
    let (component, action, arity, params) = call_of(router.resolve("/blog", "/", &registry()).unwrap());
    assert_eq!(component, "blog");
    assert_eq!(action, "index");
    assert_eq!(arity, 1);
    assert!(params.is_empty());
}

#[test]
fn test_arity_selects_exact_action() {
    let router = Router::default();
    let reg = registry();

    let (_, action, arity, params) = call_of(router.resolve("/blog/show/7", "/", &reg).unwrap());
    assert_eq!((action.as_str(), arity), ("show", 2));
    assert_eq!(params, vec![json!("7")]);

    let (_, _, arity, params) = call_of(router.resolve("/blog/show/7/comments", "/", &reg).unwrap());
    assert_eq!(arity, 3);
    assert_eq!(params, vec![json!("7"), json!("comments")]);
}

#[test]
fn test_unknown_arity_is_no_such_action() {
    let router = Router::default();
    let err = router.resolve("/blog/show", "/", &registry()).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::NoSuchAction { ref action, arity: 1, .. } if action == "show"
    ));
}

#[test]
fn test_unknown_component_is_page_passthrough() {
    let router = Router::default();
    for path in ["/missing", "/missing/anything", "/Blog/show/1"] {
        let resolved = router.resolve(path, "/", &registry()).unwrap();
        assert!(matches!(resolved, Ewc::Page(ref p) if p == path), "{path}");
    }
}

#[test]
fn test_custom_defaults() {
    let router = Router::new("show", "/home.html");
    assert!(matches!(
        router.resolve("", "/", &registry()).unwrap(),
        Ewc::Page(ref p) if p == "/home.html"
    ));
    // default action "show" with no params has arity 1, which blog does not export
    assert!(router.resolve("/blog", "/", &registry()).is_err());
}

#[test]
fn test_explicit_reference_to_unknown_component_is_fatal() {
    let err = component_call(&registry(), "missing", "index", Vec::new()).unwrap_err();
    assert!(matches!(err, DispatchError::NoSuchComponent { ref name } if name == "missing"));
}
