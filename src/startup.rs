//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use chrono::NaiveTime;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    MenuService, MenuServiceImpl, RestaurantService, RestaurantServiceImpl, VoteService,
    VoteServiceImpl,
};
use crate::config::{Settings, StorageBackend};
use crate::domain::{MenuRepository, RestaurantRepository, VoteRepository};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{
    InMemoryStore, PgMenuRepository, PgRestaurantRepository, PgVoteRepository,
};
use crate::presentation::http::handlers::health;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};
use crate::shared::clock::{Clock, SystemClock};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub menus: Arc<dyn MenuService>,
    pub restaurants: Arc<dyn RestaurantService>,
    pub votes: Arc<dyn VoteService>,
    /// Present only with the postgres backend
    pub db: Option<PgPool>,
}

impl AppState {
    /// Wire the services over one set of repositories.
    pub fn from_repositories<M, R, V>(
        menu_repo: Arc<M>,
        restaurant_repo: Arc<R>,
        vote_repo: Arc<V>,
        clock: Arc<dyn Clock>,
        deadline: NaiveTime,
        db: Option<PgPool>,
    ) -> Self
    where
        M: MenuRepository + 'static,
        R: RestaurantRepository + 'static,
        V: VoteRepository + 'static,
    {
        let menus = MenuServiceImpl::new(menu_repo.clone(), restaurant_repo.clone());
        let restaurants = RestaurantServiceImpl::new(restaurant_repo.clone());
        let votes = VoteServiceImpl::new(vote_repo, menu_repo, restaurant_repo, clock, deadline);

        Self {
            menus: Arc::new(menus),
            restaurants: Arc::new(restaurants),
            votes: Arc::new(votes),
            db,
        }
    }

    /// State backed entirely by one in-memory store.
    pub fn in_memory(store: InMemoryStore, clock: Arc<dyn Clock>, deadline: NaiveTime) -> Self {
        let store = Arc::new(store);
        Self::from_repositories(store.clone(), store.clone(), store, clock, deadline, None)
    }
}

/// Build the router with all middleware applied.
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors::create_cors_layer(&settings.cors))
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let deadline = settings.voting.deadline_time()?;
        let clock: Arc<dyn Clock> = Arc::new(
            SystemClock::with_offset_minutes(settings.voting.timezone_offset_minutes)
                .context("Invalid voting.timezone_offset_minutes")?,
        );

        let state = match settings.database.backend {
            StorageBackend::Postgres => {
                let db = database::connect(&settings.database).await?;

                AppState::from_repositories(
                    Arc::new(PgMenuRepository::new(db.clone())),
                    Arc::new(PgRestaurantRepository::new(db.clone())),
                    Arc::new(PgVoteRepository::new(db.clone())),
                    clock,
                    deadline,
                    Some(db),
                )
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                AppState::in_memory(InMemoryStore::new(), clock, deadline)
            }
        };

        let router = build_router(state, &settings);

        let addr: SocketAddr = settings
            .server_addr()
            .parse()
            .context("Invalid server address")?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
