//! Tests for recursive EWC resolution
//!
//! # Test Coverage
//!
//! - View wrapping order for two and three nesting levels
//! - List ordering and per-member tagging
//! - Opaque data passes through unchanged
//! - Redirect construction and nested redirect short-circuit
//! - Finished responses: allowed at the top level, fatal when nested
//! - Nested failures abort the whole request

use ewcrouter::ewc::{Location, RedirectScope, Resolver};
use ewcrouter::prelude::*;
use serde_json::json;
use std::sync::Arc;

mod common;
use common::{fixture_dispatcher, fixture_registry, get};

#[test]
fn test_two_level_nesting_outer_wraps_inner() {
    let dispatcher = fixture_dispatcher();
    assert_eq!(
        get(&dispatcher, "/layout").unwrap(),
        FinalResponse::Html("<main><p>hello</p></main>".to_string())
    );
}

#[test]
fn test_three_level_nesting() {
    let dispatcher = fixture_dispatcher();
    assert_eq!(
        get(&dispatcher, "/outer").unwrap(),
        FinalResponse::Html("<outer><middle><inner>x</inner></middle></outer>".to_string())
    );
}

#[test]
fn test_list_members_keep_order() {
    let dispatcher = fixture_dispatcher();
    assert_eq!(
        get(&dispatcher, "/blog").unwrap(),
        FinalResponse::List(vec![
            FinalResponse::Html("post 1".to_string()),
            FinalResponse::Html("post 2".to_string()),
            FinalResponse::Html("post 3".to_string()),
        ])
    );
}

#[test]
fn test_raw_data_passes_through_unchanged() {
    let dispatcher = fixture_dispatcher();
    assert_eq!(
        get(&dispatcher, "/headers").unwrap(),
        FinalResponse::Passthrough(json!({ "header": ["x-frame-options", "DENY"] }))
    );

    let ctx = RequestContext::new("site", "/", "/", Arc::new(fixture_registry()));
    let payload = json!({ "nested": { "list": [1, 2, 3] }, "flag": true });
    assert_eq!(
        Resolver::new(&ctx).resolve(Ewc::Data(payload.clone())).unwrap(),
        Output::Value(payload)
    );
}

#[test]
fn test_local_redirect_location() {
    let dispatcher = fixture_dispatcher();
    let response = dispatcher
        .handle(Request::new(common::APP, "/app/redirector/go").with_app_root("/app"))
        .unwrap();
    assert_eq!(
        response,
        FinalResponse::Redirect(Location {
            scope: RedirectScope::Local,
            path: "/app/foo/bar/1/x".to_string(),
        })
    );
    assert!(response.is_local_redirect());
}

#[test]
fn test_nested_redirect_short_circuits_view() {
    let dispatcher = fixture_dispatcher();
    assert_eq!(
        get(&dispatcher, "/wrapper").unwrap(),
        FinalResponse::Redirect(Location {
            scope: RedirectScope::Local,
            path: "/foo/bar/1/x".to_string(),
        })
    );
}

#[test]
fn test_final_response_at_top_level() {
    let dispatcher = fixture_dispatcher();
    assert_eq!(
        get(&dispatcher, "/finalizer").unwrap(),
        FinalResponse::Page("/static/done.html".to_string())
    );
}

#[test]
fn test_nested_final_response_is_invalid_shape() {
    let dispatcher = fixture_dispatcher();
    let err = get(&dispatcher, "/embeds_final").unwrap_err();
    assert!(matches!(
        err,
        DispatchError::InvalidResponseShape { ref component, depth: 1, .. } if component == "finalizer"
    ));
}

#[test]
fn test_nested_unknown_component_is_fatal() {
    let dispatcher = fixture_dispatcher();
    let err = get(&dispatcher, "/broken_ref").unwrap_err();
    assert!(matches!(err, DispatchError::NoSuchComponent { ref name } if name == "ghost"));
}

#[test]
fn test_action_error_aborts_request() {
    let dispatcher = fixture_dispatcher();
    let err = get(&dispatcher, "/failing").unwrap_err();
    assert!(matches!(err, DispatchError::ActionFailed { ref action, .. } if action == "index"));
    assert!(err.to_string().contains("database unavailable"));
}

#[test]
fn test_failing_list_member_fails_whole_list() {
    let ctx = RequestContext::new("site", "/", "/", Arc::new(fixture_registry()));
    let list = Ewc::list([
        Ewc::component("blog", "show", ["1"]),
        Ewc::component("failing", "index", Vec::<String>::new()),
        Ewc::component("blog", "show", ["3"]),
    ]);
    assert!(matches!(
        Resolver::new(&ctx).resolve(list),
        Err(DispatchError::ActionFailed { .. })
    ));
}

#[test]
fn test_view_hook_error_is_render_failed() {
    let registry = Registry::builder()
        .component(
            ComponentDescriptor::builder("card")
                .action("index", 1, |_| Ok(ActionResult::Data(json!(1))))
                .view("index", |_, _| Err(anyhow::anyhow!("template missing"))),
        )
        .build()
        .unwrap();
    let dispatcher = Dispatcher::default();
    dispatcher.publish("cards", registry);
    let err = dispatcher
        .handle(Request::new("cards", "/card"))
        .unwrap_err();
    assert!(matches!(err, DispatchError::RenderFailed { ref component, .. } if component == "card"));
}

#[test]
fn test_view_sees_request_context() {
    let registry = Registry::builder()
        .component(
            ComponentDescriptor::builder("page")
                .action("index", 1, |args| {
                    args.ctx.metadata().append("title", json!("Home"));
                    Ok(Ewc::component("title", "index", Vec::<String>::new()).into())
                })
                .view("index", |args, inner| {
                    Ok(Output::markup(format!(
                        "{}:{}",
                        args.ctx.app(),
                        inner.as_text().unwrap_or_default()
                    )))
                }),
        )
        .component(ComponentDescriptor::builder("title").private().action("index", 1, |args| {
            Ok(ActionResult::Data(
                args.ctx.metadata().get("title").unwrap_or_default(),
            ))
        }))
        .build()
        .unwrap();
    let dispatcher = Dispatcher::default();
    dispatcher.publish("shop", registry);
    assert_eq!(
        dispatcher.handle(Request::new("shop", "/page")).unwrap(),
        FinalResponse::Html("shop:Home".to_string())
    );
}

fn shape_dispatcher() -> Dispatcher {
    let finished = || Box::new(FinalResponse::Page("/x".to_string()));
    let registry = Registry::builder()
        .component(ComponentDescriptor::builder("frame").action("index", 1, |_| {
            Ok(Ewc::component("final_view", "index", Vec::<String>::new()).into())
        }))
        .component(ComponentDescriptor::builder("frame_list").action("index", 1, |_| {
            Ok(Ewc::component("final_list_view", "index", Vec::<String>::new()).into())
        }))
        .component(
            ComponentDescriptor::builder("final_view")
                .private()
                .action("index", 1, |_| Ok(ActionResult::Data(json!(null))))
                .view("index", move |_, _| Ok(Output::Final(finished()))),
        )
        .component(
            ComponentDescriptor::builder("final_list_view")
                .private()
                .action("index", 1, |_| Ok(ActionResult::Data(json!(null))))
                .view("index", move |_, _| {
                    Ok(Output::List(vec![Output::markup("ok"), Output::Final(finished())]))
                }),
        )
        .component(
            ComponentDescriptor::builder("top_view")
                .action("index", 1, |_| Ok(ActionResult::Data(json!(null))))
                .view("index", move |_, _| Ok(Output::Final(finished()))),
        )
        .build()
        .unwrap();
    let dispatcher = Dispatcher::default();
    dispatcher.publish("shapes", registry);
    dispatcher
}

#[test]
fn test_nested_view_returning_final_is_invalid_shape() {
    let dispatcher = shape_dispatcher();
    let err = dispatcher
        .handle(Request::new("shapes", "/frame"))
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::InvalidResponseShape { ref component, depth: 1, .. } if component == "final_view"
    ));
}

#[test]
fn test_nested_view_hiding_final_in_list_is_invalid_shape() {
    let dispatcher = shape_dispatcher();
    let err = dispatcher
        .handle(Request::new("shapes", "/frame_list"))
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::InvalidResponseShape { ref component, depth: 1, .. } if component == "final_list_view"
    ));
}

#[test]
fn test_top_level_view_may_return_final() {
    let dispatcher = shape_dispatcher();
    assert_eq!(
        dispatcher.handle(Request::new("shapes", "/top_view")).unwrap(),
        FinalResponse::Page("/x".to_string())
    );
}

#[test]
fn test_redirect_inside_list_stays_a_member() {
    let registry = Registry::builder()
        .component(ComponentDescriptor::builder("feed").action("index", 1, |_| {
            Ok(Ewc::list([
                Ewc::Data(json!("before")),
                Ewc::component("login", "index", Vec::<String>::new()),
                Ewc::Data(json!("after")),
            ])
            .into())
        }))
        .component(
            ComponentDescriptor::builder("login")
                .private()
                .action("index", 1, |_| Ok(Redirect::local("login", "form").into())),
        )
        .build()
        .unwrap();
    let dispatcher = Dispatcher::default();
    dispatcher.publish("feeds", registry);

    assert_eq!(
        dispatcher.handle(Request::new("feeds", "/feed")).unwrap(),
        FinalResponse::List(vec![
            FinalResponse::Html("before".to_string()),
            FinalResponse::Redirect(Location {
                scope: RedirectScope::Local,
                path: "/login/form".to_string(),
            }),
            FinalResponse::Html("after".to_string()),
        ])
    );
}
