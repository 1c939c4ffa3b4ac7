use crate::blog::SessionID;
use crate::config::Config;
use crate::store::Store;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod session;

pub type SharedState = axum::extract::State<Arc<State>>;
pub type NestedRouter = axum::Router<Arc<State>>;

#[derive(Debug)]
pub struct State {
    pub store: Store,
    pub sessions: RwLock<HashMap<SessionID, session::Session>>,
    pub config: Config,
}

impl State {
    pub fn new(store: Store, config: Config) -> State {
        State {
            store,
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }
}
