// ============================================================================
// ROUTE - path patterns and view references
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use yew::Html;

/// Renders a routed view from its props
pub type ViewFn = fn(&RouteProps) -> Html;

/// Path parameters handed to a view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteProps {
    params: BTreeMap<String, String>,
}

impl RouteProps {
    pub fn new(params: BTreeMap<String, String>) -> Self {
        Self { params }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A path such as `/book/:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: &'static str,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(raw: &'static str) -> Self {
        let segments = split_segments(raw)
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Static(segment.to_string()),
            })
            .collect();

        Self { raw, segments }
    }

    pub fn as_str(&self) -> &'static str {
        self.raw
    }

    /// Match a navigated path. Query and fragment are ignored, static
    /// segments compare case-insensitively and one trailing slash is allowed.
    /// Parameters match any non-empty segment and are kept verbatim.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let path = path_only(path);
        let path = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);

        let candidate: Vec<&str> = split_segments(path).collect();
        if candidate.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, actual) in self.segments.iter().zip(candidate) {
            match segment {
                Segment::Static(expected) => {
                    if !expected.eq_ignore_ascii_case(actual) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if actual.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), actual.to_string());
                }
            }
        }

        Some(params)
    }

    /// Fill the parameters of the pattern. Missing parameters stay empty.
    pub fn build(&self, params: &[(&str, &str)]) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) => {
                    if let Some((_, value)) = params.iter().find(|(k, _)| *k == name.as_str()) {
                        path.push_str(value);
                    }
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }
}

/// Strip query string and fragment
pub fn path_only(path: &str) -> &str {
    let end = path.find(&['?', '#'][..]).unwrap_or(path.len());
    &path[..end]
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    // "/" has no segments at all
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}

/// View resolved on first use and cached afterwards. No retry: the loader
/// runs exactly once.
pub struct LazyView {
    loader: fn() -> ViewFn,
    resolved: OnceLock<ViewFn>,
}

impl LazyView {
    pub const fn new(loader: fn() -> ViewFn) -> Self {
        Self {
            loader,
            resolved: OnceLock::new(),
        }
    }

    pub fn resolve(&self) -> ViewFn {
        *self.resolved.get_or_init(|| {
            log::debug!("📦 [ROUTER] Loading view");
            (self.loader)()
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

pub enum ViewRef {
    Eager(ViewFn),
    Lazy(LazyView),
}

impl ViewRef {
    pub fn resolve(&self) -> ViewFn {
        match self {
            ViewRef::Eager(view) => *view,
            ViewRef::Lazy(lazy) => lazy.resolve(),
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, ViewRef::Lazy(_))
    }
}

impl fmt::Debug for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewRef::Eager(_) => f.write_str("Eager"),
            ViewRef::Lazy(lazy) => lazy.fmt(f),
        }
    }
}

#[derive(Debug)]
pub struct Route {
    pub pattern: PathPattern,
    pub name: &'static str,
    pub view: ViewRef,
    /// Forward path parameters to the view as props
    pub props: bool,
}

impl Route {
    pub fn eager(path: &'static str, name: &'static str, view: ViewFn) -> Self {
        Self {
            pattern: PathPattern::parse(path),
            name,
            view: ViewRef::Eager(view),
            props: false,
        }
    }

    pub fn lazy(path: &'static str, name: &'static str, loader: fn() -> ViewFn) -> Self {
        Self {
            pattern: PathPattern::parse(path),
            name,
            view: ViewRef::Lazy(LazyView::new(loader)),
            props: false,
        }
    }

    pub fn with_props(mut self) -> Self {
        self.props = true;
        self
    }

    pub fn path(&self) -> &'static str {
        self.pattern.as_str()
    }
}

/// A resolved navigation
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub props: RouteProps,
}

impl RouteMatch<'_> {
    pub fn name(&self) -> &'static str {
        self.route.name
    }

    /// Resolve the (possibly lazy) view and render it
    pub fn render(&self) -> Html {
        (self.route.view.resolve())(&self.props)
    }
}
