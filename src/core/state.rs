use crate::domain::model::{BanList, Dog, History};

/// 所有會改變 UI 狀態的動作
#[derive(Debug, Clone)]
pub enum Action {
    FetchRequested,
    FetchSucceeded(Dog),
    FetchFailed(String),
    BreedBanned(String),
    BreedUnbanned(String),
}

/// reducer 回傳的反應式副作用，由呼叫端在狀態轉移後執行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Refetch,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub current: Option<Dog>,
    pub ban_list: BanList,
    pub history: History,
    pub loading: bool,
    pub error: Option<String>,
}

/// 純狀態轉移：不做 I/O，副作用只以 Effect 回報
pub fn reduce(state: &mut AppState, action: Action) -> Option<Effect> {
    match action {
        Action::FetchRequested => {
            state.loading = true;
            state.error = None;
            None
        }
        Action::FetchSucceeded(dog) => {
            state.history.record(dog.clone());
            state.current = Some(dog);
            state.loading = false;
            None
        }
        Action::FetchFailed(message) => {
            // current 保留前值（stale-but-valid），不清空
            state.error = Some(message);
            state.loading = false;
            None
        }
        Action::BreedBanned(value) => {
            let changed = state.ban_list.add(value);
            // 清單沒變就不會觸發反應式 refetch
            if !changed {
                return None;
            }
            match &state.current {
                Some(dog) if state.ban_list.contains(&dog.breed.name) => Some(Effect::Refetch),
                _ => None,
            }
        }
        Action::BreedUnbanned(value) => {
            state.ban_list.remove(&value);
            None
        }
    }
}
