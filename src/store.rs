use crate::tournament::{Match, ScoreBoard};
use crate::types::{AppResult, MatchId, MatchMap, PlayerName, SystemTimeTick, Tick, WinsMap};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

pub static PERSISTED_MATCHES_FILENAME: &str = "matches.json";
pub static PERSISTED_SCORES_FILENAME: &str = "scores.json";
pub static SCORES_DOCUMENT_KIND: &str = "score_data";

/// Persistence collaborator. Matches are upserted by id, scores by a fixed singleton key.
pub trait MatchStore {
    fn load_matches(&self) -> AppResult<MatchMap>;
    fn save_match(&mut self, match_id: MatchId, m: &Match) -> AppResult<()>;
    fn save_matches(&mut self, matches: &[(MatchId, Match)]) -> AppResult<()> {
        for (match_id, m) in matches {
            self.save_match(*match_id, m)?;
        }
        Ok(())
    }
    fn load_scores(&self) -> AppResult<Option<ScoreBoard>>;
    fn save_scores(&mut self, scores: &ScoreBoard) -> AppResult<()>;
}

/// Platform config directory of the app, created on first use.
fn config_dir() -> AppResult<PathBuf> {
    let dirs = directories::ProjectDirs::from("org", "chess-cup", "chess-cup")
        .ok_or(anyhow!("Failed to get directories"))?;
    let config_dir = dirs.config_dir();
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir)?;
    }
    Ok(config_dir.to_path_buf())
}

pub fn store_path(filename: &str) -> AppResult<PathBuf> {
    Ok(config_dir()?.join(filename))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct MatchDocument {
    match_id: MatchId,
    #[serde(default)]
    players: Option<[PlayerName; 2]>,
    #[serde(default)]
    winner: Option<PlayerName>,
    #[serde(default)]
    updated_at: Tick,
}

impl MatchDocument {
    fn new(match_id: MatchId, m: &Match) -> Self {
        Self {
            match_id,
            players: m.players.clone(),
            winner: m.winner.clone(),
            updated_at: Tick::now(),
        }
    }

    fn to_match(&self) -> Match {
        Match {
            players: self.players.clone(),
            winner: self.winner.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct ScoresDocument {
    kind: String,
    scores: WinsMap,
    #[serde(default)]
    updated_at: Tick,
}

/// Two JSON documents per store prefix: the match collection and the score singleton.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
    prefix: String,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.to_string(),
        }
    }

    /// Store under the platform config directory.
    pub fn from_prefix(prefix: &str) -> AppResult<Self> {
        Ok(Self::new(config_dir()?, prefix))
    }

    fn path(&self, filename: &str) -> PathBuf {
        self.dir.join(format!("{}_{}", self.prefix, filename))
    }

    pub fn matches_path(&self) -> PathBuf {
        self.path(PERSISTED_MATCHES_FILENAME)
    }

    pub fn scores_path(&self) -> PathBuf {
        self.path(PERSISTED_SCORES_FILENAME)
    }

    fn load_match_documents(&self) -> AppResult<Vec<MatchDocument>> {
        let path = self.matches_path();
        if !path.exists() {
            return Ok(vec![]);
        }
        load_from_json(&path)
    }

    fn upsert(&self, documents: &mut Vec<MatchDocument>, match_id: MatchId, m: &Match) {
        let document = MatchDocument::new(match_id, m);
        if let Some(existing) = documents.iter_mut().find(|d| d.match_id == match_id) {
            *existing = document;
        } else {
            documents.push(document);
        }
    }

    /// Removes the documents of this prefix.
    pub fn reset(&self) -> AppResult<()> {
        for path in [self.matches_path(), self.scores_path()] {
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

impl MatchStore for JsonStore {
    fn load_matches(&self) -> AppResult<MatchMap> {
        Ok(self
            .load_match_documents()?
            .into_iter()
            .map(|d| (d.match_id, d.to_match()))
            .collect())
    }

    fn save_match(&mut self, match_id: MatchId, m: &Match) -> AppResult<()> {
        self.save_matches(&[(match_id, m.clone())])
    }

    // All documents go out in a single file replace.
    fn save_matches(&mut self, matches: &[(MatchId, Match)]) -> AppResult<()> {
        let mut documents = self.load_match_documents()?;
        for (match_id, m) in matches {
            self.upsert(&mut documents, *match_id, m);
        }
        documents.sort_by_key(|d| d.match_id);
        save_to_json(&self.matches_path(), &documents)
    }

    fn load_scores(&self) -> AppResult<Option<ScoreBoard>> {
        let path = self.scores_path();
        if !path.exists() {
            return Ok(None);
        }
        let document: ScoresDocument = load_from_json(&path)?;
        if document.kind != SCORES_DOCUMENT_KIND {
            return Err(anyhow!(
                "Unexpected scores document kind '{}'",
                document.kind
            ));
        }
        Ok(Some(ScoreBoard::from_map(document.scores)))
    }

    fn save_scores(&mut self, scores: &ScoreBoard) -> AppResult<()> {
        let document = ScoresDocument {
            kind: SCORES_DOCUMENT_KIND.to_string(),
            scores: scores.as_map().clone(),
            updated_at: Tick::now(),
        };
        save_to_json(&self.scores_path(), &document)
    }
}

fn save_to_json<T: Serialize>(path: &Path, data: &T) -> AppResult<()> {
    let tmp_path = path.with_extension("json.tmp");
    {
        let file = File::create(&tmp_path)?;
        let buffer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(buffer, data)?;
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

fn load_from_json<T: for<'a> Deserialize<'a>>(path: &Path) -> AppResult<T> {
    let file = File::open(path)?;
    let data: T = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(data)
}

/// In-process store. `unavailable` makes every call fail like an unreachable backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub matches: MatchMap,
    pub scores: Option<ScoreBoard>,
    pub unavailable: bool,
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable {
            return Err(anyhow!("Memory store is unavailable"));
        }
        Ok(())
    }
}

impl MatchStore for MemoryStore {
    fn load_matches(&self) -> AppResult<MatchMap> {
        self.check_available()?;
        Ok(self.matches.clone())
    }

    fn save_match(&mut self, match_id: MatchId, m: &Match) -> AppResult<()> {
        self.check_available()?;
        self.matches.insert(match_id, m.clone());
        self.writes += 1;
        Ok(())
    }

    fn save_matches(&mut self, matches: &[(MatchId, Match)]) -> AppResult<()> {
        self.check_available()?;
        self.matches.extend(matches.iter().cloned());
        self.writes += 1;
        Ok(())
    }

    fn load_scores(&self) -> AppResult<Option<ScoreBoard>> {
        self.check_available()?;
        Ok(self.scores.clone())
    }

    fn save_scores(&mut self, scores: &ScoreBoard) -> AppResult<()> {
        self.check_available()?;
        self.scores = Some(scores.clone());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{store_path, JsonStore, MatchStore, MemoryStore};
    use crate::tournament::{Match, MatchTable, ScoreBoard};
    use crate::types::AppResult;

    #[test]
    fn test_empty_json_store() -> AppResult<()> {
        let dir = tempfile::tempdir()?;
        let store = JsonStore::new(dir.path(), "test");
        assert!(store.load_matches()?.is_empty());
        assert!(store.load_scores()?.is_none());
        Ok(())
    }

    #[test]
    fn test_json_store_upserts_matches() -> AppResult<()> {
        let dir = tempfile::tempdir()?;
        let mut store = JsonStore::new(dir.path(), "test");

        let table = MatchTable::new();
        let all = table
            .iter()
            .map(|(id, m)| (*id, m.clone()))
            .collect::<Vec<_>>();
        store.save_matches(&all)?;
        assert_eq!(&store.load_matches()?, table.as_map());

        let mut decided = Match::scheduled("Ankush", "Aman");
        decided.winner = Some("Aman".to_string());
        store.save_match(1, &decided)?;

        let loaded = store.load_matches()?;
        assert_eq!(loaded.len(), 10);
        assert_eq!(loaded.get(&1), Some(&decided));
        assert!(!dir.path().join("test_matches.json.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_json_store_scores_and_reset() -> AppResult<()> {
        let dir = tempfile::tempdir()?;
        let mut store = JsonStore::new(dir.path(), "test");

        let mut scores = ScoreBoard::new(&MatchTable::new().roster());
        scores.increment("Yogesh");
        store.save_scores(&scores)?;
        assert_eq!(store.load_scores()?, Some(scores));

        let raw = std::fs::read_to_string(store.scores_path())?;
        assert!(raw.contains("\"kind\": \"score_data\""));

        store.reset()?;
        assert!(store.load_scores()?.is_none());
        Ok(())
    }

    #[test]
    fn test_json_store_reads_partial_documents() -> AppResult<()> {
        let dir = tempfile::tempdir()?;
        let store = JsonStore::new(dir.path(), "test");
        std::fs::write(
            store.matches_path(),
            r#"[{"match_id": 7}, {"match_id": 1, "players": ["Ankush", "Aman"], "winner": "Ankush"}]"#,
        )?;

        let loaded = store.load_matches()?;
        assert_eq!(loaded.get(&7), Some(&Match::undetermined()));
        assert_eq!(
            loaded.get(&1).and_then(|m| m.winner.as_deref()),
            Some("Ankush")
        );
        Ok(())
    }

    #[test]
    fn test_memory_store_unavailable() {
        let mut store = MemoryStore {
            unavailable: true,
            ..Default::default()
        };
        assert!(store.load_matches().is_err());
        assert!(store.load_scores().is_err());
        assert!(store.save_match(1, &Match::undetermined()).is_err());
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn test_log_and_store_files_share_config_dir() -> AppResult<()> {
        let log_path = store_path("chess-cup.log")?;
        let store = JsonStore::from_prefix("local")?;
        assert_eq!(log_path.parent(), store.matches_path().parent());
        assert!(log_path.parent().map(|dir| dir.exists()).unwrap_or_default());
        Ok(())
    }
}
