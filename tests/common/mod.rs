#![allow(dead_code)]

use ewcrouter::prelude::*;
use serde_json::json;

pub const APP: &str = "site";

pub mod test_tracing {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    /// Routes dispatch logs to the test harness output for the current thread.
    pub struct TestTracing {
        _guard: tracing::subscriber::DefaultGuard,
    }

    impl TestTracing {
        pub fn init() -> Self {
            let subscriber = tracing_subscriber::registry()
                .with(EnvFilter::new("ewcrouter=debug"))
                .with(tracing_subscriber::fmt::layer().with_test_writer());
            Self {
                _guard: tracing::subscriber::set_default(subscriber),
            }
        }
    }
}

fn wrap(tag: &'static str) -> impl Fn(&RenderArgs<'_>, Output) -> anyhow::Result<Output> {
    move |_, inner| {
        let text = inner.as_text().unwrap_or_default();
        Ok(Output::markup(format!("<{tag}>{text}</{tag}>")))
    }
}

/// Components shared by the integration tests.
///
/// | component | behaviour |
/// |---|---|
/// | `layout` | embeds the private `greeting`, view wraps in `<main>` |
/// | `greeting` | private, returns `"hello"`, view wraps in `<p>` |
/// | `outer` / `middle` / `inner` | three-level embedding chain |
/// | `blog` | `index/1` lists posts, `show/2` echoes its id, no view |
/// | `redirector` | `go/1` redirects to `foo/bar/1/x` |
/// | `wrapper` | embeds `redirector/go`, view would wrap it |
/// | `finalizer` | returns a finished response |
/// | `embeds_final` | embeds `finalizer` |
/// | `failing` | action error |
/// | `broken_ref` | embeds an unknown component |
/// | `headers` | embeds opaque data |
pub fn fixture_registry() -> Registry {
    Registry::builder()
        .component(
            ComponentDescriptor::builder("layout")
                .action("index", 1, |_| {
                    Ok(Ewc::component("greeting", "index", Vec::<String>::new()).into())
                })
                .view("index", wrap("main")),
        )
        .component(
            ComponentDescriptor::builder("greeting")
                .private()
                .action("index", 1, |_| Ok(ActionResult::Data(json!("hello"))))
                .view("index", wrap("p")),
        )
        .component(
            ComponentDescriptor::builder("outer")
                .action("index", 1, |_| {
                    Ok(Ewc::component("middle", "index", Vec::<String>::new()).into())
                })
                .view("index", wrap("outer")),
        )
        .component(
            ComponentDescriptor::builder("middle")
                .private()
                .action("index", 1, |_| {
                    Ok(Ewc::component("inner", "index", Vec::<String>::new()).into())
                })
                .view("index", wrap("middle")),
        )
        .component(
            ComponentDescriptor::builder("inner")
                .private()
                .action("index", 1, |_| Ok(ActionResult::Data(json!("x"))))
                .view("index", wrap("inner")),
        )
        .component(
            ComponentDescriptor::builder("blog")
                .action("index", 1, |_| {
                    Ok(Ewc::list([
                        Ewc::component("blog", "show", ["1"]),
                        Ewc::component("blog", "show", ["2"]),
                        Ewc::component("blog", "show", ["3"]),
                    ])
                    .into())
                })
                .action("show", 2, |args| {
                    Ok(ActionResult::Data(json!(format!(
                        "post {}",
                        args.param_str(0).unwrap_or_default()
                    ))))
                }),
        )
        .component(
            ComponentDescriptor::builder("redirector")
                .action("go", 1, |_| {
                    Ok(Redirect::local("foo", "bar").param(1).param("x").into())
                }),
        )
        .component(
            ComponentDescriptor::builder("wrapper")
                .action("index", 1, |_| {
                    Ok(Ewc::component("redirector", "go", Vec::<String>::new()).into())
                })
                .view("index", wrap("div")),
        )
        .component(
            ComponentDescriptor::builder("finalizer").action("index", 1, |_| {
                Ok(ActionResult::Final(FinalResponse::Page("/static/done.html".to_string())))
            }),
        )
        .component(
            ComponentDescriptor::builder("embeds_final").action("index", 1, |_| {
                Ok(Ewc::component("finalizer", "index", Vec::<String>::new()).into())
            }),
        )
        .component(
            ComponentDescriptor::builder("failing")
                .action("index", 1, |_| Err(anyhow::anyhow!("database unavailable"))),
        )
        .component(
            ComponentDescriptor::builder("broken_ref").action("index", 1, |_| {
                Ok(Ewc::component("ghost", "index", Vec::<String>::new()).into())
            }),
        )
        .component(ComponentDescriptor::builder("headers").action("index", 1, |_| {
            Ok(Ewc::Raw(json!({ "header": ["x-frame-options", "DENY"] })).into())
        }))
        .build()
        .unwrap()
}

/// A dispatcher with the fixture registry published for [`APP`].
pub fn fixture_dispatcher() -> Dispatcher {
    let dispatcher = Dispatcher::default();
    dispatcher.publish(APP, fixture_registry());
    dispatcher
}

pub fn get(dispatcher: &Dispatcher, path: &str) -> Result<FinalResponse, DispatchError> {
    dispatcher.handle(Request::new(APP, path))
}
