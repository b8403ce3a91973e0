//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::db::categories::{self, CategoryTree};
use crate::db::content::{Announcement, Banner};
use crate::db::products;
use crate::error::Result;
use crate::filters;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Number of products per home page strip.
const STRIP_LIMIT: i64 = 8;

/// Banner display data for the hero carousel.
#[derive(Clone)]
pub struct BannerView {
    pub title: String,
    pub image_url: String,
    pub link: Option<String>,
}

impl From<&Banner> for BannerView {
    fn from(banner: &Banner) -> Self {
        Self {
            title: banner.title.clone(),
            image_url: banner.image_url.clone(),
            link: banner.link.clone(),
        }
    }
}

/// Announcement bar display data.
#[derive(Clone)]
pub struct AnnouncementView {
    pub message: String,
    pub link: Option<String>,
    pub background_color: String,
    pub text_color: String,
}

impl From<&Announcement> for AnnouncementView {
    fn from(a: &Announcement) -> Self {
        Self {
            message: a.message.clone(),
            link: a.link.clone(),
            background_color: a.background_color.clone(),
            text_color: a.text_color.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub banners: Vec<BannerView>,
    pub announcement: Option<AnnouncementView>,
    pub categories: Vec<CategoryTree>,
    pub featured: Vec<ProductCardView>,
    pub new_arrivals: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let banners = state.active_banners().await;
    let announcement = state.active_announcement().await;
    let categories = categories::active_tree(state.pool()).await?;
    let featured = products::featured(state.pool(), STRIP_LIMIT).await?;
    let new_arrivals = products::new_arrivals(state.pool(), STRIP_LIMIT).await?;

    Ok(HomeTemplate {
        banners: banners.iter().map(BannerView::from).collect(),
        announcement: announcement.as_ref().as_ref().map(AnnouncementView::from),
        categories,
        featured: featured.iter().map(ProductCardView::from).collect(),
        new_arrivals: new_arrivals.iter().map(ProductCardView::from).collect(),
    })
}
