use std::path::PathBuf;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::Session;

/// Default install locations of the League client lockfile.
///
/// Checked in order; the first readable, parseable file wins.
pub fn default_lockfile_paths() -> Vec<PathBuf> {
    [
        r"C:\Riot Games\League of Legends\lockfile",
        r"C:\Program Files\Riot Games\League of Legends\lockfile",
        r"C:\Program Files (x86)\Riot Games\League of Legends\lockfile",
        r"C:\Games\Riot Games\League of Legends\lockfile",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

/// Process-wide credential state.
///
/// A manually submitted session always wins over lockfile discovery and
/// lives until it is overwritten or the process exits. Concurrent manual
/// submissions are last-writer-wins; the lock guarantees a reader never
/// observes a half-written session.
pub struct SessionStore {
    manual: RwLock<Option<Session>>,
    candidate_paths: Vec<PathBuf>,
}

impl SessionStore {
    pub fn new(candidate_paths: Vec<PathBuf>) -> Self {
        Self {
            manual: RwLock::new(None),
            candidate_paths,
        }
    }

    /// Resolve credentials: manual session first, then lockfile discovery.
    pub async fn resolve(&self) -> AppResult<Session> {
        if let Some(session) = self.manual.read().await.clone() {
            return Ok(session);
        }
        self.discover().ok_or(AppError::CredentialsNotFound)
    }

    /// Install a manually supplied session, replacing any previous one.
    pub async fn set_manual(&self, session: Session) {
        info!("Manual lockfile data accepted (port {})", session.port);
        *self.manual.write().await = Some(session);
    }

    /// Try each candidate path in order. Read and parse errors at one path
    /// are swallowed and the next path is tried.
    fn discover(&self) -> Option<Session> {
        for path in &self.candidate_paths {
            let content = match std::fs::read_to_string(path) {
                Ok(c) => c,
                Err(e) => {
                    debug!("Skipping lockfile candidate {}: {}", path.display(), e);
                    continue;
                }
            };
            match Session::parse_lockfile(&content) {
                Ok(session) => {
                    info!("Found lockfile at {}", path.display());
                    return Some(session);
                }
                Err(e) => {
                    debug!("Unparseable lockfile at {}: {}", path.display(), e);
                }
            }
        }
        debug!("No lockfile found in any of the expected locations");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual_session(port: u16, password: &str) -> Session {
        Session {
            name: None,
            pid: None,
            port,
            password: password.to_string(),
            protocol: "https".to_string(),
        }
    }

    #[tokio::test]
    async fn resolve_without_any_source_is_not_found() {
        let store = SessionStore::new(vec![PathBuf::from("/nonexistent/lockfile")]);
        assert!(matches!(
            store.resolve().await,
            Err(AppError::CredentialsNotFound)
        ));
    }

    #[tokio::test]
    async fn discovers_first_parseable_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad");
        let good = dir.path().join("good");
        std::fs::write(&bad, "only:three:fields").unwrap();
        std::fs::write(&good, "LeagueClient:77:52341:hunter2:https").unwrap();

        let store = SessionStore::new(vec![
            PathBuf::from("/nonexistent/lockfile"),
            bad,
            good,
        ]);
        let session = store.resolve().await.unwrap();
        assert_eq!(session.port, 52341);
        assert_eq!(session.password, "hunter2");
    }

    #[tokio::test]
    async fn manual_session_wins_over_discovery() {
        let dir = tempfile::tempdir().unwrap();
        let lockfile = dir.path().join("lockfile");
        std::fs::write(&lockfile, "LeagueClient:77:52341:from-file").unwrap();

        let store = SessionStore::new(vec![lockfile]);
        store.set_manual(manual_session(9999, "from-manual")).await;

        let session = store.resolve().await.unwrap();
        assert_eq!(session.port, 9999);
        assert_eq!(session.password, "from-manual");
    }

    #[tokio::test]
    async fn later_manual_submission_overwrites_earlier() {
        let store = SessionStore::new(vec![]);
        store.set_manual(manual_session(1111, "first")).await;
        store.set_manual(manual_session(2222, "second")).await;
        let session = store.resolve().await.unwrap();
        assert_eq!(session.port, 2222);
        assert_eq!(session.password, "second");
    }

    #[tokio::test]
    async fn concurrent_submissions_leave_exactly_one_intact_session() {
        let store = std::sync::Arc::new(SessionStore::new(vec![]));
        let a = manual_session(1111, "writer-a");
        let b = manual_session(2222, "writer-b");

        let (s1, s2) = (store.clone(), store.clone());
        let (a2, b2) = (a.clone(), b.clone());
        let t1 = tokio::spawn(async move { s1.set_manual(a2).await });
        let t2 = tokio::spawn(async move { s2.set_manual(b2).await });
        t1.await.unwrap();
        t2.await.unwrap();

        let winner = store.resolve().await.unwrap();
        assert!(winner == a || winner == b, "mixed-field session observed");
    }
}
