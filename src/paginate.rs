use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::api_client::{ApiError, GraphqlTransport};
use crate::config::Config;
use crate::model::{EventData, RawEvent};

pub const FIRST_PAGE_QUERY: &str = r#"
query EventCharacters($slug: String!, $page: Int!, $perPage: Int!) {
  event(slug: $slug) {
    videogame {
      characters {
        id
        name
      }
    }
    sets(perPage: $perPage, page: $page, sortType: RECENT) {
      nodes {
        games {
          selections {
            entrant {
              name
            }
            selectionValue
          }
        }
      }
    }
  }
}
"#;

pub const SETS_PAGE_QUERY: &str = r#"
query EventSets($slug: String!, $page: Int!, $perPage: Int!) {
  event(slug: $slug) {
    sets(perPage: $perPage, page: $page, sortType: RECENT) {
      nodes {
        games {
          selections {
            entrant {
              name
            }
            selectionValue
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Clone, Copy)]
pub struct PageOptions {
    pub per_page: u32,
    pub complexity_threshold: u32,
    pub max_pages: u32,
}

impl From<&Config> for PageOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            per_page: cfg.per_page,
            complexity_threshold: cfg.complexity_threshold,
            max_pages: cfg.max_pages,
        }
    }
}

#[derive(Debug, Default)]
pub struct EventPage {
    pub event: Option<RawEvent>,
    pub complexity: u32,
}

#[derive(Debug, Deserialize)]
struct GqlEnvelope {
    data: Option<GqlData>,
    errors: Option<Vec<GqlErrorItem>>,
    extensions: Option<GqlExtensions>,
}

#[derive(Debug, Deserialize)]
struct GqlData {
    event: Option<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct GqlErrorItem {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct GqlExtensions {
    #[serde(rename = "queryComplexity")]
    query_complexity: Option<u32>,
}

/// Parses one GraphQL response body. A missing complexity score reads as 0.
pub fn parse_event_page(raw: &str) -> Result<EventPage, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(ApiError::Decode("empty response".to_string()));
    }
    let envelope: GqlEnvelope =
        serde_json::from_str(trimmed).map_err(|err| ApiError::Decode(err.to_string()))?;

    let complexity = envelope
        .extensions
        .and_then(|ext| ext.query_complexity)
        .unwrap_or_default();

    let messages = envelope
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>();

    let Some(data) = envelope.data else {
        if messages.is_empty() {
            return Err(ApiError::Decode("response has no data".to_string()));
        }
        return Err(ApiError::Graphql(messages.join("; ")));
    };

    // A null event next to an `errors` array is a failed page, not an empty one.
    match data.event {
        None if !messages.is_empty() => Err(ApiError::Graphql(messages.join("; "))),
        event => Ok(EventPage { event, complexity }),
    }
}

/// Fetches every page of sets for `slug`, following the complexity signal.
pub fn fetch_event<T>(transport: &T, slug: &str, opts: PageOptions) -> Result<EventData>
where
    T: GraphqlTransport + ?Sized,
{
    let first = fetch_page(transport, FIRST_PAGE_QUERY, slug, 1, opts.per_page)?;
    let event = first
        .event
        .ok_or_else(|| anyhow!("event not found for slug {slug}"))?;

    let characters = event
        .videogame
        .and_then(|game| game.characters)
        .unwrap_or_default();
    let mut sets = event
        .sets
        .and_then(|conn| conn.nodes)
        .unwrap_or_default();
    let mut complexity = first.complexity;
    let mut page = 1;
    debug!(page, complexity, sets = sets.len(), "fetched first page");

    while complexity > opts.complexity_threshold {
        if page >= opts.max_pages {
            warn!(
                page,
                complexity,
                max_pages = opts.max_pages,
                "page cap reached while complexity still above threshold"
            );
            break;
        }
        page += 1;
        let next = fetch_page(transport, SETS_PAGE_QUERY, slug, page, opts.per_page)?;
        complexity = next.complexity;
        let nodes = next
            .event
            .and_then(|ev| ev.sets)
            .and_then(|conn| conn.nodes)
            .unwrap_or_default();
        debug!(page, complexity, sets = nodes.len(), "fetched page");
        if nodes.is_empty() {
            if complexity > opts.complexity_threshold {
                warn!(
                    page,
                    complexity,
                    "empty page while complexity still above threshold"
                );
            }
            break;
        }
        sets.extend(nodes);
    }

    info!(
        pages = page,
        sets = sets.len(),
        characters = characters.len(),
        "event fetch complete"
    );

    Ok(EventData {
        characters,
        sets,
        pages_fetched: page,
        last_complexity: complexity,
    })
}

fn fetch_page<T>(
    transport: &T,
    query: &str,
    slug: &str,
    page: u32,
    per_page: u32,
) -> Result<EventPage>
where
    T: GraphqlTransport + ?Sized,
{
    let variables = json!({ "slug": slug, "page": page, "perPage": per_page });
    let body = transport
        .post(query, &variables)
        .with_context(|| format!("page {page} request failed"))?;
    parse_event_page(&body).with_context(|| format!("page {page} response invalid"))
}
