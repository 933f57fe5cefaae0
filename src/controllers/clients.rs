//! Client list screen.
//!
//! Every successful mutation reloads the whole active list from the store.
//! Searching filters the active list on each qualifying keystroke, without
//! debouncing.

use log::{debug, error};
use tokio::sync::watch;

use crate::controllers::StateStore;
use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::forms::client::ClientForm;
use crate::repository::{ClientReader, ClientWriter};

/// Queries shorter than this (but not empty) do not hit the store.
pub const MIN_SEARCH_CHARS: usize = 2;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientListState {
    pub clients: Vec<Client>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub search_query: String,
    pub selected_client: Option<Client>,
    pub show_add_dialog: bool,
    pub show_edit_dialog: bool,
    pub show_delete_dialog: bool,
}

pub struct ClientListController<R> {
    repo: R,
    state: StateStore<ClientListState>,
}

impl<R> ClientListController<R>
where
    R: ClientReader + ClientWriter,
{
    pub fn new(repo: R) -> Self {
        let mut controller = Self {
            repo,
            state: StateStore::default(),
        };
        controller.load_clients();
        controller
    }

    pub fn subscribe(&self) -> watch::Receiver<ClientListState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ClientListState {
        self.state.snapshot()
    }

    fn start_loading(&self) {
        self.state.update(|s| {
            s.is_loading = true;
            s.error_message = None;
        });
    }

    fn fail(&self, prefix: &str, err: impl std::fmt::Display) {
        let message = format!("{prefix}: {err}");
        self.state.update(|s| {
            s.is_loading = false;
            s.error_message = Some(message);
        });
    }

    pub fn load_clients(&mut self) {
        self.start_loading();

        match self.repo.list_clients() {
            Ok(clients) => {
                debug!("loaded {} clients", clients.len());
                self.state.update(|s| {
                    s.clients = clients;
                    s.is_loading = false;
                });
            }
            Err(err) => {
                error!("failed to load clients: {err}");
                self.fail("Errore", err);
            }
        }
    }

    pub fn search_clients(&mut self, query: &str) {
        let query = query.to_string();
        self.state.update(|s| {
            s.search_query = query.clone();
            s.is_loading = true;
            s.error_message = None;
        });

        match self.repo.search_clients(&query) {
            Ok(clients) => {
                debug!("search '{query}': {} results", clients.len());
                self.state.update(|s| {
                    s.clients = clients;
                    s.is_loading = false;
                });
            }
            Err(err) => {
                error!("client search failed: {err}");
                self.fail("Errore ricerca", err);
            }
        }
    }

    /// Records the text and searches once it is empty or long enough.
    pub fn on_search_query_changed(&mut self, query: &str) {
        let text = query.to_string();
        self.state.update(|s| s.search_query = text);

        let length = query.chars().count();
        if length == 0 || length >= MIN_SEARCH_CHARS {
            self.search_clients(query);
        }
    }

    pub fn add_client(&mut self, form: ClientForm) {
        let new_client = match form.into_new_client() {
            Ok(new_client) => new_client,
            Err(err) => {
                self.state.update(|s| s.error_message = Some(err.to_string()));
                return;
            }
        };

        self.start_loading();
        match self.repo.create_client(&new_client) {
            Ok(id) => {
                debug!("client added: {id}");
                self.state.update(|s| {
                    s.is_loading = false;
                    s.show_add_dialog = false;
                });
                self.load_clients();
            }
            Err(err) => {
                error!("failed to add client: {err}");
                self.fail("Errore aggiunta", err);
            }
        }
    }

    /// Overwrites the stored client with `client`.
    pub fn update_client(&mut self, client: Client) {
        self.start_loading();
        match self.repo.update_client(&client.id, &client) {
            Ok(()) => {
                debug!("client updated: {}", client.id);
                self.state.update(|s| {
                    s.is_loading = false;
                    s.show_edit_dialog = false;
                    s.selected_client = None;
                });
                self.load_clients();
            }
            Err(err) => {
                error!("failed to update client {}: {err}", client.id);
                self.fail("Errore aggiornamento", err);
            }
        }
    }

    /// Applies the edit dialog to the selected client and saves it.
    pub fn save_edit(&mut self, form: ClientForm) {
        let Some(selected) = self.state.snapshot().selected_client else {
            self.state
                .update(|s| s.error_message = Some("Nessun cliente selezionato".to_string()));
            return;
        };
        match form.apply_to(&selected) {
            Ok(client) => self.update_client(client),
            Err(err) => self.state.update(|s| s.error_message = Some(err.to_string())),
        }
    }

    pub fn delete_client(&mut self, id: &ClientId) {
        self.start_loading();
        match self.repo.delete_client(id) {
            Ok(()) => {
                debug!("client deactivated: {id}");
                self.state.update(|s| {
                    s.is_loading = false;
                    s.show_delete_dialog = false;
                    s.selected_client = None;
                });
                self.load_clients();
            }
            Err(err) => {
                error!("failed to delete client {id}: {err}");
                self.fail("Errore eliminazione", err);
            }
        }
    }

    pub fn select_client(&mut self, client: Client) {
        self.state.update(|s| s.selected_client = Some(client));
    }

    pub fn show_add_dialog(&mut self) {
        self.state.update(|s| s.show_add_dialog = true);
    }

    pub fn hide_add_dialog(&mut self) {
        self.state.update(|s| s.show_add_dialog = false);
    }

    pub fn show_edit_dialog(&mut self, client: Client) {
        self.state.update(|s| {
            s.selected_client = Some(client);
            s.show_edit_dialog = true;
        });
    }

    pub fn hide_edit_dialog(&mut self) {
        self.state.update(|s| {
            s.show_edit_dialog = false;
            s.selected_client = None;
        });
    }

    pub fn show_delete_dialog(&mut self, client: Client) {
        self.state.update(|s| {
            s.selected_client = Some(client);
            s.show_delete_dialog = true;
        });
    }

    pub fn hide_delete_dialog(&mut self) {
        self.state.update(|s| {
            s.show_delete_dialog = false;
            s.selected_client = None;
        });
    }

    pub fn clear_error(&mut self) {
        self.state.update(|s| s.error_message = None);
    }
}
