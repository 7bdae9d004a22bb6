use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use snafu::prelude::*;
use spotify_profile_models::Page;
use tokio::sync::Mutex;
use tracing::debug;

/// Offset advance for every `load_more` call. Deliberately decoupled from the
/// initial page size used by the sources (8): the upstream call sites always
/// paged in strides of 10 after the first page.
pub const PAGE_STRIDE: usize = 10;

const DEFAULT_MAX_ITEMS: usize = 50;

#[derive(Snafu, Debug)]
pub enum PageError {
    #[snafu(display("{message}"))]
    Fetch { message: String },
}

pub type Result<T, E = PageError> = std::result::Result<T, E>;

/// A source of offset-paged items, keyed by a caller-chosen string (a time
/// window id, or a single implicit key for an unkeyed list).
#[async_trait::async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, key: &str, offset: usize) -> Result<Page<T>>;
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    envelope: Page<T>,
    items: Vec<T>,
    offset: usize,
    has_more: bool,
}

#[derive(Debug)]
struct PagerState<T> {
    key: String,
    cache: HashMap<String, CacheEntry<T>>,
    error: Option<String>,
    loading: bool,
    started: bool,
}

/// Snapshot of the pager for rendering: the accumulated items re-wrapped in
/// the last-seen envelope, plus the flags a list view needs.
#[derive(Debug, Clone)]
pub struct PagerView<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub key: String,
    pub has_more: bool,
    pub loading: bool,
    pub loading_more: bool,
    pub error: Option<String>,
}

/// Paginated fetch-and-cache state for one list view.
///
/// Accumulated items for a key are a prefix, in server-return order, of the
/// items obtainable for that key; nothing is de-duplicated or re-ordered.
/// Entries are never invalidated within a session; memory stays bounded by
/// `max_items` per key and the small fixed key set.
#[derive(Debug)]
pub struct Pager<T> {
    max_items: usize,
    state: Mutex<PagerState<T>>,
    loading_more: AtomicBool,
}

impl<T: Clone + Send> Pager<T> {
    pub fn new(initial_key: impl Into<String>, max_items: Option<usize>) -> Self {
        Self {
            max_items: max_items.unwrap_or(DEFAULT_MAX_ITEMS),
            state: Mutex::new(PagerState {
                key: initial_key.into(),
                cache: HashMap::new(),
                error: None,
                loading: false,
                started: false,
            }),
            loading_more: AtomicBool::new(false),
        }
    }

    /// First-ever load for the active key. This is the only path that raises
    /// the full-page `loading` flag; key switches later on use the inline
    /// indicator instead.
    pub async fn ensure_initial<S: PageSource<T> + ?Sized>(&self, source: &S) {
        let first = {
            let mut state = self.state.lock().await;
            if state.cache.contains_key(&state.key) {
                return;
            }
            let first = !state.started;
            state.started = true;
            if first {
                state.loading = true;
            }
            first
        };

        self.load_fresh(source).await;

        if first {
            self.state.lock().await.loading = false;
        }
    }

    /// Switch the active key. A cached key switches instantly and clears any
    /// stale error; an unseen key is fetched at offset 0 without toggling the
    /// full-page loading flag.
    pub async fn change_key<S: PageSource<T> + ?Sized>(&self, source: &S, key: &str) {
        let cached = {
            let mut state = self.state.lock().await;
            state.key = key.to_string();
            let hit = state.cache.contains_key(key);
            if hit {
                state.error = None;
            }
            hit
        };

        if cached {
            debug!("cache hit for key {key}");
            return;
        }

        self.load_fresh(source).await;
    }

    /// Fetch the next page for the active key. No-op while another load is in
    /// flight, when no more items are available, or when nothing has been
    /// loaded yet. Reaching the item ceiling clears `has_more` without a
    /// network call.
    pub async fn load_more<S: PageSource<T> + ?Sized>(&self, source: &S) {
        if self
            .loading_more
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        // NOTE: the key is captured here; switching keys mid-flight is
        // unguarded, and a stale response writes back under this key.
        let Some((key, offset, len)) = ({
            let state = self.state.lock().await;
            let key = state.key.clone();
            state
                .cache
                .get(&key)
                .filter(|entry| entry.has_more)
                .map(|entry| (key, entry.offset, entry.items.len()))
        }) else {
            self.loading_more.store(false, Ordering::Release);
            return;
        };

        if len >= self.max_items {
            let mut state = self.state.lock().await;
            if let Some(entry) = state.cache.get_mut(&key) {
                entry.has_more = false;
            }
            self.loading_more.store(false, Ordering::Release);
            return;
        }

        let next_offset = offset + PAGE_STRIDE;
        match source.fetch_page(&key, next_offset).await {
            Ok(page) => {
                let mut state = self.state.lock().await;
                if let Some(entry) = state.cache.get_mut(&key) {
                    entry.items.extend(page.items.iter().cloned());
                    // A full page appended near the ceiling may overshoot it;
                    // the accumulated list never grows past max_items.
                    entry.items.truncate(self.max_items);
                    entry.offset = next_offset;
                    entry.has_more = more_available(entry.items.len(), page.total, self.max_items);
                    entry.envelope = page;
                }
            }
            Err(error) => {
                debug!("load more failed for key {key}: {error}");
                self.state.lock().await.error = Some(error.to_string());
            }
        }

        self.loading_more.store(false, Ordering::Release);
    }

    /// Accumulated items re-wrapped in the last-seen envelope, with flags.
    pub async fn view(&self) -> PagerView<T> {
        let state = self.state.lock().await;
        let entry = state.cache.get(&state.key);

        PagerView {
            items: entry.map(|e| e.items.clone()).unwrap_or_default(),
            total: entry.map(|e| e.envelope.total).unwrap_or(0),
            key: state.key.clone(),
            has_more: entry.map(|e| e.has_more).unwrap_or(false),
            loading: state.loading,
            loading_more: self.loading_more.load(Ordering::Acquire),
            error: state.error.clone(),
        }
    }

    async fn load_fresh<S: PageSource<T> + ?Sized>(&self, source: &S) {
        let key = self.state.lock().await.key.clone();

        match source.fetch_page(&key, 0).await {
            Ok(page) => {
                let mut state = self.state.lock().await;
                let has_more = more_available(page.items.len(), page.total, self.max_items);
                state.cache.insert(
                    key,
                    CacheEntry {
                        items: page.items.clone(),
                        offset: 0,
                        has_more,
                        envelope: page,
                    },
                );
                state.error = None;
            }
            Err(error) => {
                debug!("initial load failed for key {key}: {error}");
                self.state.lock().await.error = Some(error.to_string());
            }
        }
    }
}

/// One `Pager` per session identity, created lazily with shared settings.
///
/// Accumulated items and the active key belong to whichever credential loaded
/// them; nothing is shared across sessions. Entries live for the process
/// lifetime, like the per-key entries inside each pager.
#[derive(Debug)]
pub struct SessionPagers<T> {
    initial_key: String,
    max_items: Option<usize>,
    pagers: Mutex<HashMap<String, Arc<Pager<T>>>>,
}

impl<T: Clone + Send> SessionPagers<T> {
    pub fn new(initial_key: impl Into<String>, max_items: Option<usize>) -> Self {
        Self {
            initial_key: initial_key.into(),
            max_items,
            pagers: Mutex::new(HashMap::new()),
        }
    }

    pub async fn for_session(&self, session: &str) -> Arc<Pager<T>> {
        let mut pagers = self.pagers.lock().await;

        pagers
            .entry(session.to_string())
            .or_insert_with(|| Arc::new(Pager::new(self.initial_key.clone(), self.max_items)))
            .clone()
    }
}

fn more_available(accumulated: usize, total: u64, max_items: usize) -> bool {
    (accumulated as u64) < total && accumulated < max_items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    #[derive(Default, Debug, Clone, PartialEq)]
    struct Item(usize);

    /// Serves `total` items per key, in whatever chunk sizes the script says
    /// for each offset. Counts every fetch.
    struct ScriptedSource {
        chunks: HashMap<usize, usize>,
        total: u64,
        calls: AtomicUsize,
        delay: Option<Duration>,
        fail_at_offset: Option<usize>,
    }

    impl ScriptedSource {
        fn new(chunks: &[(usize, usize)], total: u64) -> Self {
            Self {
                chunks: chunks.iter().copied().collect(),
                total,
                calls: AtomicUsize::new(0),
                delay: None,
                fail_at_offset: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl PageSource<Item> for ScriptedSource {
        async fn fetch_page(&self, _key: &str, offset: usize) -> Result<Page<Item>> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            if self.fail_at_offset == Some(offset) {
                return Err(PageError::Fetch {
                    message: "upstream unavailable".into(),
                });
            }

            let count = *self.chunks.get(&offset).unwrap_or(&0);
            Ok(Page {
                items: (offset..offset + count).map(Item).collect(),
                total: self.total,
                next: None,
                previous: None,
            })
        }
    }

    #[tokio::test]
    async fn accumulation_is_monotonic_and_capped() {
        let source = ScriptedSource::new(
            &[(0, 8), (10, 10), (20, 10), (30, 10), (40, 10), (50, 10)],
            1000,
        );
        let pager = Pager::new("k", Some(50));
        pager.ensure_initial(&source).await;

        let mut previous = pager.view().await.items.len();
        for _ in 0..10 {
            pager.load_more(&source).await;
            let len = pager.view().await.items.len();
            assert!(len >= previous);
            assert!(len <= 50);
            previous = len;
        }
    }

    #[tokio::test]
    async fn reaching_the_ceiling_stops_network_calls() {
        let source = ScriptedSource::new(&[(0, 8), (10, 10)], 1000);
        let pager = Pager::new("k", Some(18));
        pager.ensure_initial(&source).await;
        pager.load_more(&source).await;
        assert_eq!(pager.view().await.items.len(), 18);

        let calls_before = source.calls();
        pager.load_more(&source).await;

        let view = pager.view().await;
        assert!(!view.has_more);
        assert_eq!(source.calls(), calls_before);

        // has_more is now false, so further calls stay no-ops.
        pager.load_more(&source).await;
        assert_eq!(source.calls(), calls_before);
    }

    #[tokio::test]
    async fn revisiting_a_key_is_served_from_cache() {
        let source = ScriptedSource::new(&[(0, 8), (10, 10)], 100);
        let pager = Pager::new("a", None);
        pager.ensure_initial(&source).await;
        pager.load_more(&source).await;

        let before = pager.view().await;
        pager.change_key(&source, "b").await;
        let calls_after_switch = source.calls();

        pager.change_key(&source, "a").await;

        let after = pager.view().await;
        assert_eq!(source.calls(), calls_after_switch);
        assert_eq!(after.items, before.items);
        assert_eq!(after.items.len(), 18);
    }

    #[tokio::test]
    async fn new_key_fetches_once_without_full_loader() {
        let source = ScriptedSource::new(&[(0, 8)], 100);
        let pager = Pager::new("a", None);
        pager.ensure_initial(&source).await;
        assert_eq!(source.calls(), 1);

        pager.change_key(&source, "b").await;

        let view = pager.view().await;
        assert_eq!(source.calls(), 2);
        assert!(!view.loading);
        assert_eq!(view.items.len(), 8);
    }

    #[tokio::test]
    async fn three_loads_drain_a_list_of_twenty() {
        let source = ScriptedSource::new(&[(0, 8), (10, 10), (20, 2)], 20);
        let pager = Pager::new("k", Some(50));
        pager.ensure_initial(&source).await;
        pager.load_more(&source).await;
        pager.load_more(&source).await;

        let view = pager.view().await;
        assert_eq!(view.items.len(), 20);
        assert!(!view.has_more);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn failed_load_more_keeps_accumulated_items() {
        let mut source = ScriptedSource::new(&[(0, 8)], 100);
        source.fail_at_offset = Some(10);
        let pager = Pager::new("k", None);
        pager.ensure_initial(&source).await;

        pager.load_more(&source).await;

        let view = pager.view().await;
        assert_eq!(view.items.len(), 8);
        assert_eq!(view.error.as_deref(), Some("upstream unavailable"));
        assert!(!view.loading_more);
    }

    #[tokio::test]
    async fn concurrent_load_more_is_single_flight() {
        let mut source = ScriptedSource::new(&[(0, 8), (10, 10)], 100);
        source.delay = Some(Duration::from_millis(50));
        let source = Arc::new(source);
        let pager = Arc::new(Pager::new("k", None));
        pager.ensure_initial(source.as_ref()).await;
        let calls_before = source.calls();

        let first = {
            let pager = pager.clone();
            let source = source.clone();
            tokio::spawn(async move { pager.load_more(source.as_ref()).await })
        };
        let second = {
            let pager = pager.clone();
            let source = source.clone();
            tokio::spawn(async move { pager.load_more(source.as_ref()).await })
        };
        let (a, b) = tokio::join!(first, second);
        a.unwrap();
        b.unwrap();

        assert_eq!(source.calls(), calls_before + 1);
        assert_eq!(pager.view().await.items.len(), 18);
    }

    #[tokio::test]
    async fn initial_failure_leaves_data_empty_but_reports() {
        let mut source = ScriptedSource::new(&[], 0);
        source.fail_at_offset = Some(0);
        let pager = Pager::new("k", None);

        pager.ensure_initial(&source).await;

        let view = pager.view().await;
        assert!(view.items.is_empty());
        assert_eq!(view.error.as_deref(), Some("upstream unavailable"));
        assert!(!view.loading);
    }

    #[tokio::test]
    async fn sessions_never_observe_each_others_items() {
        let pagers = SessionPagers::new("k", None);
        let alice_source = ScriptedSource::new(&[(0, 8)], 100);
        let bob_source = ScriptedSource::new(&[(0, 3)], 3);

        let alice = pagers.for_session("token-alice").await;
        alice.ensure_initial(&alice_source).await;

        // The second session gets a fresh pager, so its own source is
        // consulted instead of serving the first session's entries.
        let bob = pagers.for_session("token-bob").await;
        bob.ensure_initial(&bob_source).await;

        assert_eq!(bob_source.calls(), 1);
        assert_eq!(bob.view().await.items.len(), 3);
        assert_eq!(alice.view().await.items.len(), 8);

        bob.change_key(&bob_source, "other").await;
        assert_eq!(alice.view().await.key, "k");

        let alice_again = pagers.for_session("token-alice").await;
        alice_again.ensure_initial(&alice_source).await;
        assert_eq!(alice_source.calls(), 1);
        assert_eq!(alice_again.view().await.items.len(), 8);
    }

    #[tokio::test]
    async fn cache_hit_switch_clears_stale_error() {
        let mut source = ScriptedSource::new(&[(0, 8)], 100);
        let pager = Pager::new("a", None);
        pager.ensure_initial(&source).await;

        source.fail_at_offset = Some(10);
        pager.load_more(&source).await;
        assert!(pager.view().await.error.is_some());

        pager.change_key(&source, "a").await;
        assert!(pager.view().await.error.is_none());
    }
}
