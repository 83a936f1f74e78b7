//! GitHub statistics feed.
//!
//! Fetches the profile and repository list on a background thread with a
//! request timeout, sums stargazers, and delivers the result over a channel
//! polled by the update loop. Failures degrade to the cached value, then to
//! fixed mock data; nothing here can reach the scene as an error.

use serde::Deserialize;
use std::sync::mpsc;
use std::time::{Duration, Instant};

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const CACHE_LIFETIME: Duration = Duration::from_secs(5 * 60);
const REPOS_PER_PAGE: usize = 100;
const MAX_REPOS: usize = 200;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GithubStats {
    pub repo_count: u32,
    pub total_stars: u32,
    pub followers: u32,
}

/// Stand-in values when no live or cached data is available.
pub const MOCK_STATS: GithubStats = GithubStats {
    repo_count: 24,
    total_stars: 156,
    followers: 42,
};

#[derive(Clone, Debug)]
pub enum MetricLoadState {
    NotLoaded,
    Loading,
    Loaded(GithubStats),
    Failed(String),
}

#[derive(Deserialize)]
struct UserPayload {
    public_repos: u32,
    followers: u32,
}

#[derive(Deserialize)]
struct RepoPayload {
    stargazers_count: u32,
}

fn parse_user(json: &str) -> Result<(u32, u32), String> {
    let user: UserPayload =
        serde_json::from_str(json).map_err(|e| format!("user payload: {}", e))?;
    Ok((user.public_repos, user.followers))
}

fn parse_repo_stars(json: &str) -> Result<Vec<u32>, String> {
    let repos: Vec<RepoPayload> =
        serde_json::from_str(json).map_err(|e| format!("repos payload: {}", e))?;
    Ok(repos.into_iter().map(|r| r.stargazers_count).collect())
}

fn get(agent: &ureq::Agent, url: &str) -> Result<String, String> {
    let response = agent
        .get(url)
        .set("Accept", "application/vnd.github.v3+json")
        .call()
        .map_err(|e| format!("HTTP error: {}", e))?;
    response.into_string().map_err(|e| format!("Read error: {}", e))
}

/// Blocking fetch of user stats plus stargazer totals across repo pages.
pub fn fetch_stats(username: &str) -> Result<GithubStats, String> {
    let agent = ureq::AgentBuilder::new()
        .timeout(FETCH_TIMEOUT)
        .build();

    let user_json = get(&agent, &format!("https://api.github.com/users/{}", username))?;
    let (repo_count, followers) = parse_user(&user_json)?;

    let mut total_stars = 0u32;
    let mut fetched = 0usize;
    let mut page = 1usize;
    loop {
        let url = format!(
            "https://api.github.com/users/{}/repos?per_page={}&page={}&sort=updated",
            username, REPOS_PER_PAGE, page
        );
        let stars = parse_repo_stars(&get(&agent, &url)?)?;
        let batch = stars.len();
        total_stars += stars.iter().sum::<u32>();
        fetched += batch;
        if batch < REPOS_PER_PAGE || fetched >= MAX_REPOS {
            break;
        }
        page += 1;
    }

    Ok(GithubStats { repo_count, total_stars, followers })
}

/// A metric delivery: the stats to apply, and whether they were substituted
/// from cache or mock data after a failure.
#[derive(Clone, Copy, Debug)]
pub struct MetricUpdate {
    pub stats: GithubStats,
    pub substituted: bool,
}

fn substitute(cached: Option<GithubStats>) -> MetricUpdate {
    MetricUpdate {
        stats: cached.unwrap_or(MOCK_STATS),
        substituted: true,
    }
}

/// Owns the fetch lifecycle: spawn, poll, cache, degrade.
pub struct GithubFeed {
    username: String,
    pub state: MetricLoadState,
    cached: Option<(GithubStats, Instant)>,
    rx: Option<mpsc::Receiver<Result<GithubStats, String>>>,
}

impl GithubFeed {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            state: MetricLoadState::NotLoaded,
            cached: None,
            rx: None,
        }
    }

    /// Starts a background fetch unless one is in flight or the cache is
    /// still fresh (a fresh cache is re-delivered on the next poll instead).
    pub fn refresh(&mut self) {
        if matches!(self.state, MetricLoadState::Loading) {
            return;
        }
        if let Some((stats, at)) = self.cached {
            if at.elapsed() < CACHE_LIFETIME {
                self.state = MetricLoadState::Loaded(stats);
                return;
            }
        }
        let (tx, rx) = mpsc::channel();
        let username = self.username.clone();
        self.rx = Some(rx);
        self.state = MetricLoadState::Loading;
        std::thread::spawn(move || {
            let _ = tx.send(fetch_stats(&username));
        });
    }

    /// Non-blocking poll of an in-flight fetch. A completed fetch is applied
    /// even if it arrives after a fallback was already delivered
    /// (last-write-wins).
    pub fn poll(&mut self) -> Option<MetricUpdate> {
        let result = self.rx.as_ref()?.try_recv().ok()?;
        self.rx = None;
        match result {
            Ok(stats) => {
                self.cached = Some((stats, Instant::now()));
                self.state = MetricLoadState::Loaded(stats);
                Some(MetricUpdate { stats, substituted: false })
            }
            Err(err) => {
                log::warn!("GitHub fetch failed: {}", err);
                let update = substitute(self.cached.map(|(s, _)| s));
                self.state = MetricLoadState::Failed(err);
                Some(update)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_payload() {
        let json = r#"{"login":"internetsb","public_repos":24,"followers":42,"bio":null}"#;
        assert_eq!(parse_user(json), Ok((24, 42)));
    }

    #[test]
    fn test_parse_user_rejects_garbage() {
        assert!(parse_user("not json").is_err());
        assert!(parse_user(r#"{"login":"x"}"#).is_err());
    }

    #[test]
    fn test_parse_repo_stars() {
        let json = r#"[
            {"name":"a","stargazers_count":10},
            {"name":"b","stargazers_count":0},
            {"name":"c","stargazers_count":146}
        ]"#;
        let stars = parse_repo_stars(json).unwrap();
        assert_eq!(stars.iter().sum::<u32>(), 156);
    }

    #[test]
    fn test_substitute_prefers_cache_over_mock() {
        let cached = GithubStats { repo_count: 5, total_stars: 9, followers: 1 };
        let update = substitute(Some(cached));
        assert!(update.substituted);
        assert_eq!(update.stats, cached);

        let update = substitute(None);
        assert!(update.substituted);
        assert_eq!(update.stats, MOCK_STATS);
    }

    #[test]
    fn test_feed_failure_delivers_mock() {
        let mut feed = GithubFeed::new("nobody");
        let (tx, rx) = mpsc::channel();
        feed.rx = Some(rx);
        feed.state = MetricLoadState::Loading;
        tx.send(Err("HTTP error: 403".to_string())).unwrap();

        let update = feed.poll().expect("result pending");
        assert!(update.substituted);
        assert_eq!(update.stats, MOCK_STATS);
        assert!(matches!(feed.state, MetricLoadState::Failed(_)));
    }

    #[test]
    fn test_feed_success_caches() {
        let mut feed = GithubFeed::new("nobody");
        let (tx, rx) = mpsc::channel();
        feed.rx = Some(rx);
        feed.state = MetricLoadState::Loading;
        let stats = GithubStats { repo_count: 2, total_stars: 7, followers: 3 };
        tx.send(Ok(stats)).unwrap();

        let update = feed.poll().expect("result pending");
        assert!(!update.substituted);
        assert_eq!(update.stats, stats);

        // A refresh inside the cache window re-delivers without a new fetch.
        feed.refresh();
        assert!(matches!(feed.state, MetricLoadState::Loaded(s) if s == stats));
        assert!(feed.rx.is_none());
    }

    #[test]
    fn test_poll_without_pending_fetch() {
        let mut feed = GithubFeed::new("nobody");
        assert!(feed.poll().is_none());
    }
}
