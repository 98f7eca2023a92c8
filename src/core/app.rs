use crate::core::discover::DiscoverEngine;
use crate::core::state::{reduce, Action, AppState, Effect};
use crate::domain::ports::DogSource;

/// 應用服務：持有狀態、跑「動作 → reduce → effect」迴圈
pub struct DiscoverApp<S: DogSource> {
    state: AppState,
    engine: DiscoverEngine<S>,
}

impl<S: DogSource> DiscoverApp<S> {
    pub fn new(engine: DiscoverEngine<S>) -> Self {
        Self {
            state: AppState::default(),
            engine,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// 抓一隻新狗。回傳是否接受了新結果。
    ///
    /// 單飛保護：loading 旗標在進入點檢查，重疊呼叫直接拒絕為 no-op。
    pub async fn discover(&mut self) -> bool {
        if self.state.loading {
            tracing::warn!("⏳ A discover call is already in flight, ignoring");
            return false;
        }

        reduce(&mut self.state, Action::FetchRequested);

        // 封鎖清單在呼叫當下取快照
        let ban_list = self.state.ban_list.clone();
        match self.engine.discover(&ban_list).await {
            Ok(dog) => {
                reduce(&mut self.state, Action::FetchSucceeded(dog));
                true
            }
            Err(err) => {
                tracing::warn!("❌ Discover failed: {}", err);
                tracing::warn!("💡 {}", err.recovery_suggestion());
                reduce(
                    &mut self.state,
                    Action::FetchFailed(err.user_friendly_message()),
                );
                false
            }
        }
    }

    /// Ban 一個屬性值（品種名、性格 token、產地），值原樣入清單。
    /// 若目前顯示的狗因此被封鎖，自動補抓一次。
    pub async fn ban(&mut self, value: impl Into<String>) {
        let effect = reduce(&mut self.state, Action::BreedBanned(value.into()));
        if let Some(Effect::Refetch) = effect {
            tracing::info!("🔁 Current dog's breed is now banned, fetching a replacement");
            self.discover().await;
        }
    }

    /// 性格 token 在進清單前修剪前後空白
    pub async fn ban_temperament(&mut self, token: &str) {
        self.ban(token.trim().to_string()).await;
    }

    /// 解除封鎖；永不觸發 refetch
    pub fn unban(&mut self, value: &str) {
        reduce(&mut self.state, Action::BreedUnbanned(value.to_string()));
    }
}
