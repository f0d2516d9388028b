use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use bisoshi_api::{ApiClient, ChatbotClient, HttpTransport, Transport};
use bisoshi_core::{FileSessionStore, Session, SessionStore};
use bisoshi_engine::{BoardOverview, TableState};
use bisoshi_runtime::{ChatSession, Config, ListController, catalog};
use bisoshi_types::{
    Client as ClientRow, Clients, Course, Product, Products, RegisterRequest, Resource, Route,
    Sale, Sales,
};
use log::info;
use serde::Serialize;

/// Everything the sale view needs: the sales plus the pick lists for the
/// client and product selectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleViewData {
    pub sales: Vec<Sale>,
    pub clients: Vec<ClientRow>,
    pub products: Vec<Product>,
}

/// Entry point: configuration, session and transport wired together.
pub struct Client<T = HttpTransport> {
    data_dir: Option<PathBuf>,
    config: Config,
    session: Session,
    store: Arc<dyn SessionStore>,
    transport: T,
}

impl Client<HttpTransport> {
    /// Open the data directory: load `config.toml` and restore the session.
    pub fn connect(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config = Config::load_from(&bisoshi_core::config_path(&data_dir))?;
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::in_data_dir(&data_dir));
        let transport = HttpTransport::new(config.timeout())?;

        let mut client = Self::with_transport(config, store, transport)?;
        client.data_dir = Some(data_dir);
        Ok(client)
    }

    /// Resolve the data directory (flag, `BISOSHI_PATH`, system default) and connect.
    pub fn connect_default(explicit: Option<&str>) -> Result<Self> {
        let data_dir = bisoshi_core::resolve_data_dir(explicit)?;
        Self::connect(data_dir)
    }
}

impl<T: Transport + Clone> Client<T> {
    pub fn with_transport(config: Config, store: Arc<dyn SessionStore>, transport: T) -> Result<Self> {
        let session = Session::restore(store.as_ref())?;
        Ok(Self {
            data_dir: None,
            config,
            session,
            store,
            transport,
        })
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> ApiClient<T> {
        ApiClient::new(
            self.config.api.base_url.as_str(),
            self.transport.clone(),
            self.session.clone(),
        )
    }

    // -- accounts -------------------------------------------------------------

    /// Sign in and persist the token for later runs.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let token = self.api().login(email, password).await?;
        self.store.save(&token)?;
        info!("signed in as {}", email);
        Ok(())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.api().register(request).await?;
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.session.sign_out();
        self.store.clear()?;
        Ok(())
    }

    // -- list views -----------------------------------------------------------

    /// Fresh controller for `R`, not yet loaded.
    pub fn list<R: Resource>(&self) -> ListController<R, T> {
        ListController::new(self.api(), TableState::new(self.config.table.rows_per_page))
    }

    pub fn products(&self) -> ListController<Products, T> {
        self.list()
    }

    pub fn clients(&self) -> ListController<Clients, T> {
        self.list()
    }

    pub fn sales(&self) -> ListController<Sales, T> {
        self.list()
    }

    /// Fetch sales, clients and products concurrently.
    pub async fn sale_view(&self) -> Result<SaleViewData> {
        let api = self.api();
        let (sales, clients, products) = futures::try_join!(
            api.list::<Sales>(),
            api.list::<Clients>(),
            api.list::<Products>(),
        )?;
        Ok(SaleViewData {
            sales,
            clients,
            products,
        })
    }

    /// Dashboard metrics for `year`.
    pub async fn overview(&self, year: i32) -> Result<BoardOverview> {
        let api = self.api();
        let (products, sales) =
            futures::try_join!(api.list::<Products>(), api.list::<Sales>())?;
        Ok(BoardOverview::build(&products, &sales, year))
    }

    // -- chatbot and courses ----------------------------------------------------

    /// New conversation; canned replies when no endpoint is configured.
    pub fn chat(&self) -> ChatSession<T> {
        let bot = self
            .config
            .chatbot_settings()
            .map(|settings| ChatbotClient::new(settings, self.transport.clone()));
        ChatSession::new(bot)
    }

    pub fn courses(&self) -> Vec<Course> {
        catalog::courses()
    }

    pub fn course(&self, id: u32) -> Result<Course> {
        catalog::course(id).ok_or_else(|| Error::NotFound(format!("course {}", id)))
    }

    // -- routing ----------------------------------------------------------------

    /// Where `path` lands given the current session.
    pub fn route(&self, path: &str) -> Route {
        Route::parse(path).resolve(self.session.is_signed_in())
    }
}
