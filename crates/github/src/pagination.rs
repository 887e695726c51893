//! `Link` header parsing for GitHub's cursor-less pagination
//!
//! GitHub advertises further pages as
//! `<https://api.github.com/...&page=2>; rel="next", <...&page=5>; rel="last"`.

/// Page links extracted from a `Link` header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPagination {
    pub next: Option<String>,
    pub prev: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
}

/// Parse a `Link` header value. Unknown relations and malformed entries are skipped.
pub fn parse_link_header(header: &str) -> LinkPagination {
    let mut links = LinkPagination::default();

    for part in header.split(',') {
        let mut sections = part.split(';');
        let Some(target) = sections.next() else {
            continue;
        };

        let target = target.trim();
        if !(target.starts_with('<') && target.ends_with('>')) || target.len() < 2 {
            continue;
        }
        let url = target[1..target.len() - 1].to_string();

        for param in sections {
            let param = param.trim();
            let Some(rel) = param.strip_prefix("rel=") else {
                continue;
            };

            for rel in rel.trim_matches('"').split_whitespace() {
                match rel {
                    "next" => links.next = Some(url.clone()),
                    "prev" => links.prev = Some(url.clone()),
                    "first" => links.first = Some(url.clone()),
                    "last" => links.last = Some(url.clone()),
                    _ => {}
                }
            }
        }
    }

    links
}
