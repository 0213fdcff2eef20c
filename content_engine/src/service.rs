//! The content service: local generation, then the generative fallback,
//! then correction.

use std::sync::Arc;
use symbol_db::{Database, GameContent};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::corrector::Corrector;
use crate::error::Result;
use crate::fallback::{GenerativeFallback, HttpGenerativeService};
use crate::local::LocalGenerator;

/// Answers `generate(word)` requests.
///
/// Holds no mutable state, so one instance can serve any number of
/// concurrent requests.
#[derive(Clone)]
pub struct ContentService {
    db: Arc<Database>,
    fallback: Option<GenerativeFallback>,
}

impl ContentService {
    /// A service with local generation only.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db, fallback: None }
    }

    pub fn with_fallback(mut self, fallback: GenerativeFallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Load the database and set up the HTTP fallback as configured.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let db = Database::load(&config.database)?;
        let service = Self::new(Arc::new(db));

        let settings = &config.fallback;
        if !settings.enabled {
            info!("Generative fallback disabled");
            return Ok(service);
        }

        let http = HttpGenerativeService::new(
            settings.endpoint.clone(),
            settings.model.clone(),
            settings.api_key(),
            settings.timeout(),
        )?;
        info!(model = http.model(), endpoint = %settings.endpoint, "Generative fallback enabled");
        Ok(service.with_fallback(GenerativeFallback::new(Arc::new(http), settings.timeout())))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Local generation only. Never touches the network.
    pub fn generate_local(&self, word: &str) -> Option<GameContent> {
        LocalGenerator::new(&self.db).generate(word, &mut rand::thread_rng())
    }

    fn correct(&self, content: GameContent) -> GameContent {
        Corrector::new(&self.db).correct(content, &mut rand::thread_rng())
    }

    /// Build a round for `word`. `None` means there is no game for this word.
    pub async fn generate(&self, word: &str) -> Option<GameContent> {
        if let Some(content) = self.generate_local(word) {
            debug!(word, "Answered locally");
            return Some(content);
        }

        let fallback = self.fallback.as_ref()?;
        let span = info_span!("fallback", request_id = %Uuid::new_v4(), word);
        let generated = fallback.generate(word).instrument(span).await?;
        Some(self.correct(generated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FallbackError;
    use crate::fallback::{GenerationRequest, GenerativeService};
    use crate::fixtures::sample_database;
    use async_trait::async_trait;
    use std::time::Duration;
    use symbol_db::{Color, ContentType};

    struct FixedService(GameContent);

    #[async_trait]
    impl GenerativeService for FixedService {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn generate(&self, _request: &GenerationRequest) -> Result<GameContent> {
            Ok(self.0.clone())
        }
    }

    struct FailingService;

    #[async_trait]
    impl GenerativeService for FailingService {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _request: &GenerationRequest) -> Result<GameContent> {
            Err(FallbackError::InvalidResponse("no".to_string()))
        }
    }

    fn local_only() -> ContentService {
        ContentService::new(Arc::new(sample_database()))
    }

    fn with_reply(content: GameContent) -> ContentService {
        local_only().with_fallback(GenerativeFallback::new(
            Arc::new(FixedService(content)),
            Duration::from_secs(1),
        ))
    }

    #[tokio::test]
    async fn test_red() {
        let content = local_only().generate("red").await.unwrap();
        assert_eq!(content.content_type, ContentType::Color);
        assert_eq!(content.target_value, "red");
        let [first, second] = content.distractors.map(|d| Color::from_word(&d).unwrap());
        assert!(!Color::Red.is_similar(first));
        assert!(!Color::Red.is_similar(second));
        assert!(!first.is_similar(second));
    }

    #[tokio::test]
    async fn test_rojo_same_as_red() {
        let service = local_only();
        let rojo = service.generate("ROJO").await.unwrap();
        let red = service.generate("red").await.unwrap();
        assert_eq!(rojo.content_type, red.content_type);
        assert_eq!(rojo.target_value, red.target_value);
    }

    #[tokio::test]
    async fn test_dog() {
        let service = local_only();
        let db = service.database();
        let content = service.generate("dog").await.unwrap();

        assert_eq!(content.content_type, ContentType::Symbol);
        assert_eq!(content.target_value, "🐕");
        let [first, second] = &content.distractors;
        assert!(!db.are_similar("🐕", first));
        assert!(!db.are_similar("🐕", second));
        assert!(!db.are_similar(first, second));
        assert_eq!(db.category_of(first).unwrap().as_str(), "animals");
        assert_eq!(db.category_of(second).unwrap().as_str(), "animals");
    }

    #[tokio::test]
    async fn test_unknown_word_without_fallback() {
        let service = local_only();
        assert!(!service.has_fallback());
        assert_eq!(service.generate("xyznonexistent").await, None);
    }

    #[tokio::test]
    async fn test_local_hit_skips_fallback() {
        let unicorn = GameContent::symbol("🦄", ["🐸".to_string(), "🚗".to_string()]);
        let content = with_reply(unicorn).generate("horse").await.unwrap();
        assert_eq!(content.target_value, "🐎");
    }

    #[tokio::test]
    async fn test_fallback_output_corrected() {
        let flowers = GameContent::symbol("🌸", ["🌹".to_string(), "🌷".to_string()]);
        let service = with_reply(flowers);
        let db = service.database();

        let content = service.generate("sakura").await.unwrap();
        assert_eq!(content.target_value, "🌸");
        let [first, second] = &content.distractors;
        assert!(!db.are_similar("🌸", first));
        assert!(!db.are_similar("🌸", second));
        assert!(!db.are_similar(first, second));
    }

    #[tokio::test]
    async fn test_fallback_failure_is_not_found() {
        let service = local_only().with_fallback(GenerativeFallback::new(
            Arc::new(FailingService),
            Duration::from_secs(1),
        ));
        assert_eq!(service.generate("xyznonexistent").await, None);
    }

    #[tokio::test]
    async fn test_concurrent_requests() {
        let unicorn = GameContent::symbol("🦄", ["🐸".to_string(), "🚗".to_string()]);
        let service = Arc::new(with_reply(unicorn.clone()));

        let handles: Vec<_> = ["dog", "unicorn", "red", "xyz", "horse", "verde"]
            .into_iter()
            .map(|word| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.generate(word).await })
            })
            .collect();

        for handle in handles {
            let content = handle.await.unwrap().unwrap();
            content.validate().unwrap();
        }
    }

    #[test]
    fn test_generate_local_is_sync() {
        let service = local_only();
        assert_eq!(service.generate_local("dog").unwrap().target_value, "🐕");
        assert_eq!(service.generate_local("unicorn"), None);
    }

    #[test]
    fn test_from_config_without_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symbols.bin");
        sample_database().save(&path).unwrap();

        let mut config = EngineConfig {
            database: path,
            ..EngineConfig::default()
        };
        config.fallback.enabled = false;

        let service = ContentService::from_config(&config).unwrap();
        assert!(!service.has_fallback());
        assert_eq!(service.database().symbol_count(), sample_database().symbol_count());
    }

    #[test]
    fn test_from_config_missing_database() {
        let config = EngineConfig {
            database: "does/not/exist.bin".into(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            ContentService::from_config(&config),
            Err(FallbackError::Database(_))
        ));
    }
}
