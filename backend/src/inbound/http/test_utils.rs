//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    FilesQuery, LoginService, MockFilesQuery, MockLoginService,
    MockSessionQuery, MockUsersCommand, MockUsersQuery, SessionQuery, UsersCommand, UsersQuery,
};

use super::state::{HttpState, HttpStatePorts};

/// Build an [`HttpState`] from mocks.
///
/// Ports left unset get a mock with no expectations, so any call into them
/// fails the test.
pub struct HttpStateBuilder {
    login: Arc<dyn LoginService>,
    session: Arc<dyn SessionQuery>,
    users: Arc<dyn UsersCommand>,
    users_query: Arc<dyn UsersQuery>,
    files_query: Arc<dyn FilesQuery>,
}

impl HttpStateBuilder {
    pub fn new() -> Self {
        Self {
            login: Arc::new(MockLoginService::new()),
            session: Arc::new(MockSessionQuery::new()),
            users: Arc::new(MockUsersCommand::new()),
            users_query: Arc::new(MockUsersQuery::new()),
            files_query: Arc::new(MockFilesQuery::new()),
        }
    }

    pub fn with_login(mut self, login: MockLoginService) -> Self {
        self.login = Arc::new(login);
        self
    }

    pub fn with_session(mut self, session: MockSessionQuery) -> Self {
        self.session = Arc::new(session);
        self
    }

    pub fn with_users(mut self, users: MockUsersCommand) -> Self {
        self.users = Arc::new(users);
        self
    }

    pub fn with_users_query(mut self, users_query: MockUsersQuery) -> Self {
        self.users_query = Arc::new(users_query);
        self
    }

    pub fn with_files_query(mut self, files_query: MockFilesQuery) -> Self {
        self.files_query = Arc::new(files_query);
        self
    }

    pub fn build(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: self.login,
            session: self.session,
            users: self.users,
            users_query: self.users_query,
            files_query: self.files_query,
        })
    }
}

/// Session mock accepting exactly one token for `id`.
pub fn session_for(id: crate::domain::UserId, token: &'static str) -> MockSessionQuery {
    let mut session = MockSessionQuery::new();
    session
        .expect_authenticate_bearer()
        .withf(move |candidate| candidate == token)
        .return_const(Ok(id));
    session
}
