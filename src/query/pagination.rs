use serde::Serialize;
use url::Url;

/// Query-string family a request used for paging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamStyle {
    #[default]
    SkipTake,
    OffsetLimit,
    PagePerPage,
}

impl ParamStyle {
    /// Parameter names, skip-like first
    pub fn names(self) -> (&'static str, &'static str) {
        match self {
            ParamStyle::SkipTake => ("skip", "take"),
            ParamStyle::OffsetLimit => ("offset", "limit"),
            ParamStyle::PagePerPage => ("page", "per_page"),
        }
    }

    /// Values to emit for a `(skip, take)` window in this style
    pub fn values(self, skip: usize, take: usize) -> (usize, usize) {
        match self {
            ParamStyle::PagePerPage => ((skip / take.max(1)).saturating_add(1), take),
            _ => (skip, take),
        }
    }
}

/// A `(skip, take)` window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: usize,
    pub take: usize,
}

/// Windows adjacent to the current page; `None` means no such link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageWindows {
    pub prev: Option<Window>,
    pub next: Option<Window>,
    pub first: Option<Window>,
    pub last: Option<Window>,
}

impl PageWindows {
    pub fn compute(total_count: usize, skip: usize, take: usize) -> Self {
        let prev = (skip > 0).then(|| {
            if skip < take {
                Window { skip: 0, take: skip }
            } else {
                Window { skip: skip - take, take }
            }
        });

        let end = skip.saturating_add(take);
        let next = (total_count > end).then_some(Window { skip: end, take });

        let first = (skip > 0).then_some(Window { skip: 0, take });

        let last = (total_count > take).then(|| Window {
            skip: total_count - take,
            take,
        });

        Self {
            prev,
            next,
            first,
            last,
        }
    }
}

/// Fully-formed link URLs for the pages around the current one
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

impl PageLinks {
    /// `Link` header value: `<url>; rel="name"` entries joined by commas
    pub fn link_header(&self) -> String {
        [
            ("prev", self.prev.as_deref()),
            ("next", self.next.as_deref()),
            ("first", self.first.as_deref()),
            ("last", self.last.as_deref()),
        ]
        .into_iter()
        .filter_map(|(rel, url)| url.map(|url| format!("<{}>; rel=\"{}\"", url, rel)))
        .collect::<Vec<_>>()
        .join(", ")
    }

    pub fn is_empty(&self) -> bool {
        self.prev.is_none() && self.next.is_none() && self.first.is_none() && self.last.is_none()
    }
}

/// Build page links for a result set of `total_count` documents.
///
/// `base_url` keeps its own query parameters; the paging pair of `style` is
/// appended after them.
pub fn paginate(
    base_url: &Url,
    total_count: usize,
    skip: usize,
    take: usize,
    style: ParamStyle,
) -> PageLinks {
    let mut windows = PageWindows::compute(total_count, skip, take);
    if style == ParamStyle::PagePerPage {
        // page holding the final document
        windows.last = windows.last.map(|w| {
            let per_page = w.take.max(1);
            Window {
                skip: (total_count - 1) / per_page * per_page,
                take: w.take,
            }
        });
    }
    let render = |window: Option<Window>| window.map(|w| page_url(base_url, w, style));

    PageLinks {
        prev: render(windows.prev),
        next: render(windows.next),
        first: render(windows.first),
        last: render(windows.last),
    }
}

fn page_url(base_url: &Url, window: Window, style: ParamStyle) -> String {
    let (skip_name, take_name) = style.names();
    let (skip, take) = style.values(window.skip, window.take);

    let mut url = base_url.clone();
    url.query_pairs_mut()
        .append_pair(skip_name, &skip.to_string())
        .append_pair(take_name, &take.to_string());
    url.to_string()
}
