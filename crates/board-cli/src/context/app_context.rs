use anyhow::Context;
use board_config::BoardConfig;
use board_core::entities::{InsightRecord, References};
use board_core::enums::InsightKind;
use board_gateway::AnswerClient;
use board_memory::MemoryStore;
use board_parser::citations::{extract_references, references_for};
use board_parser::parse_insight;
use board_parser::sections::{Section, split_sections};
use tokio::task::JoinSet;

use crate::context::AlertPreset;

/// Title of a saved scenario analysis.
pub const SCENARIO_TITLE: &str = "Scenario Analysis";

/// Characters of the first section kept as a saved scenario's description.
const SCENARIO_DESCRIPTION_CHARS: usize = 100;

/// Application state owned by the running command.
///
/// Cloning is cheap: the store and the client are shared handles, so every
/// clone writes to the same records.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: BoardConfig,
    pub store: MemoryStore,
    pub client: AnswerClient,
    pub company: String,
}

impl AppContext {
    /// Build the answer client from `config.client` and start with an empty store.
    pub fn init(config: BoardConfig) -> anyhow::Result<Self> {
        let client =
            AnswerClient::from_config(&config.client).context("failed to build answer client")?;
        Ok(Self::with_client(config, client))
    }

    #[must_use]
    pub fn with_client(config: BoardConfig, client: AnswerClient) -> Self {
        let company = config.general.company.clone();
        Self {
            config,
            store: MemoryStore::new(),
            client,
            company,
        }
    }

    /// Generate one record: append it as loading, ask once, then write exactly
    /// one terminal update. Failures end up in the record, not in the result.
    ///
    /// Returns the record id.
    pub async fn generate(&self, title: &str, prompt: &str, kind: InsightKind) -> i64 {
        let id = self
            .store
            .append_fresh(now_millis(), |id| InsightRecord::loading(id, title, kind));
        tracing::info!(id, title, %kind, "generation dispatched");

        match self.client.ask(prompt).await {
            Ok(completion) => {
                let mut parsed = parse_insight(completion.first_content());
                if parsed.references.is_empty() {
                    parsed.references = completion.citation_references();
                }
                tracing::debug!(
                    id,
                    action_items = parsed.action_items.len(),
                    references = parsed.references.len(),
                    "answer parsed"
                );
                self.store
                    .update_by_id(id, |record| record.resolve(title, parsed));
            }
            Err(error) => {
                tracing::warn!(id, title, %error, "insight generation failed");
                self.store.update_by_id(id, |record| record.fail(title));
            }
        }
        id
    }

    /// Ask once for a long-form brief and return its markdown.
    ///
    /// Nothing is stored; see [`Self::save_section`] and
    /// [`Self::save_scenario`].
    pub async fn fetch_brief(&self, prompt: &str) -> anyhow::Result<String> {
        let completion = self
            .client
            .ask(prompt)
            .await
            .context("failed to generate brief")?;
        let markdown = completion.first_content().to_string();
        tracing::info!(chars = markdown.len(), "brief received");
        Ok(markdown)
    }

    /// Store one brief section as a `board-pack` record. Only the references
    /// the section cites are kept.
    pub fn save_section(&self, section: &Section, references: &References) -> i64 {
        let cited = references_for(&section.content, references);
        let id = self.store.append_fresh(now_millis(), |id| {
            InsightRecord::saved(
                id,
                &section.title,
                section.content.clone(),
                section.content.clone(),
                cited,
            )
        });
        tracing::info!(id, title = %section.title, "section saved to board pack");
        id
    }

    /// Store a whole scenario analysis as a `board-pack` record with every
    /// reference it lists.
    pub fn save_scenario(&self, markdown: &str) -> i64 {
        let description = split_sections(markdown)
            .first()
            .map(|section| {
                let head: String = section
                    .content
                    .chars()
                    .take(SCENARIO_DESCRIPTION_CHARS)
                    .collect();
                format!("{head}...")
            })
            .unwrap_or_default();
        let references = extract_references(markdown);
        let id = self.store.append_fresh(now_millis(), |id| {
            InsightRecord::saved(id, SCENARIO_TITLE, description, markdown, references)
        });
        tracing::info!(id, "scenario saved to board pack");
        id
    }

    /// Run every preset as its own task. Returns record ids in argument order.
    pub async fn run_presets(&self, presets: &[AlertPreset]) -> anyhow::Result<Vec<i64>> {
        let mut tasks = JoinSet::new();
        for (index, preset) in presets.iter().copied().enumerate() {
            let ctx = self.clone();
            tasks.spawn(async move {
                let prompt = preset.prompt(&ctx.company);
                let id = ctx.generate(preset.title(), &prompt, preset.kind()).await;
                (index, id)
            });
        }

        let mut ids = vec![0; presets.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, id) = joined.context("alert task failed")?;
            ids[index] = id;
        }
        Ok(ids)
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
