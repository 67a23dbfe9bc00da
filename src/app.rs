/// The iced application: state, messages, update and view
///
/// Every message is translated into one controller event. Location changes
/// queued by the history during an update are re-dispatched as
/// `FragmentChanged` messages so they are handled as separate events.

use iced::keyboard::{self, key, Modifiers};
use iced::widget::{column, container, text};
use iced::{Element, Length, Subscription, Task, Theme};
use tracing::info;

use crate::catalog::{CatalogSource, HttpCatalog};
use crate::config::Settings;
use crate::error::FetchError;
use crate::route::{History, Navigator};
use crate::state::{CatalogStore, FetchTicket, Product, ProductId};
use crate::sync::{DebounceTicket, SearchInput, SyncController};
use crate::ui;
use crate::ui::images::ImageCache;
use crate::ui::order_menu::{OrderMenu, OrderMenuMessage};
use crate::ui::projector::Region;
use crate::ui::shell::{LatestFrame, SearchBox};

type Controller = SyncController<History, SearchBox, LatestFrame>;

/// Main application state
pub struct BrewCatalog {
    /// Keeps location, store and search input in agreement
    controller: Controller,
    /// Where the catalog comes from
    api: HttpCatalog,
    /// Text of the location bar while the user edits it
    location_draft: String,
    /// Fragment the location bar was last synced to
    synced_location: String,
    /// Product images by url
    images: ImageCache,
    /// Order menu inside the detail overlay
    order_menu: OrderMenu,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// The location fragment changed (navigation or a history write)
    FragmentChanged,
    /// User typed in the search box
    SearchChanged(String),
    /// The debounce window for a keystroke elapsed
    SearchSettled(DebounceTicket),
    /// User clicked a product card
    CardActivated(ProductId),
    /// Close button, backdrop click or Escape
    CloseOverlay,
    /// A catalog request finished
    CatalogLoaded(FetchTicket, Result<Vec<Product>, FetchError>),
    /// A product image download finished
    ImageLoaded(String, Result<Vec<u8>, FetchError>),
    /// User asked to fetch again after a failure
    Retry,
    Back,
    Forward,
    LocationEdited(String),
    LocationSubmitted,
    OrderMenu(OrderMenuMessage),
}

impl BrewCatalog {
    /// Create a new instance of the application and start the catalog fetch
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        let api = HttpCatalog::new(settings.api_url.clone());
        info!(api_url = %api.url(), fragment = %settings.initial_fragment, "Brew Catalog initialized");

        let mut controller = SyncController::new(
            CatalogStore::new(),
            History::new(settings.initial_fragment.clone()),
            SearchBox::default(),
            LatestFrame::default(),
            settings.search_debounce(),
        );
        let ticket = controller.start();

        let location = controller.navigator().current().to_string();
        let app = BrewCatalog {
            location_draft: location.clone(),
            synced_location: location,
            controller,
            api,
            images: ImageCache::default(),
            order_menu: OrderMenu::default(),
        };
        let fetch = app.fetch(ticket);

        (app, fetch)
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.handle(message);
        Task::batch([task, self.drain_fragment_changes()])
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FragmentChanged => {
                let before = self.controller.catalog().selected_id();
                self.controller.on_fragment_changed();
                if self.controller.catalog().selected_id() != before {
                    self.order_menu.close();
                }

                // Typing in the location bar survives synthetic change events
                let current = self.controller.navigator().current();
                if current != self.synced_location {
                    self.synced_location = current.to_string();
                    self.location_draft = current.to_string();
                }
                Task::none()
            }
            Message::SearchChanged(value) => {
                let ticket = self.controller.on_search_input(&value);
                self.controller.input_mut().type_text(value);

                let window = self.controller.debounce_window();
                Task::perform(async move { tokio::time::sleep(window).await }, move |_| {
                    Message::SearchSettled(ticket)
                })
            }
            Message::SearchSettled(ticket) => {
                self.controller.on_search_settled(ticket);
                Task::none()
            }
            Message::CardActivated(id) => {
                self.controller.on_product_activated(id);
                Task::none()
            }
            Message::CloseOverlay => {
                if self.controller.catalog().selected_product.is_some() {
                    self.order_menu.close();
                    self.controller.on_overlay_closed();
                }
                Task::none()
            }
            Message::CatalogLoaded(ticket, result) => {
                self.controller.on_catalog_loaded(ticket, result);
                self.load_images()
            }
            Message::ImageLoaded(url, result) => {
                self.images.finish(url, result);
                Task::none()
            }
            Message::Retry => {
                let ticket = self.controller.refetch();
                self.fetch(ticket)
            }
            Message::Back => {
                self.controller.navigator_mut().back();
                Task::none()
            }
            Message::Forward => {
                self.controller.navigator_mut().forward();
                Task::none()
            }
            Message::LocationEdited(draft) => {
                self.location_draft = draft;
                Task::none()
            }
            Message::LocationSubmitted => {
                let fragment = self.location_draft.trim().to_string();
                self.controller.navigator_mut().push(fragment);
                Task::none()
            }
            Message::OrderMenu(message) => {
                self.order_menu.update(message);
                Task::none()
            }
        }
    }

    /// Count and clear the location changes queued by the history
    fn take_fragment_changes(&mut self) -> usize {
        let mut changes = 0;
        while self.controller.navigator_mut().take_change() {
            changes += 1;
        }
        changes
    }

    /// Turn queued location changes into FragmentChanged events
    fn drain_fragment_changes(&mut self) -> Task<Message> {
        let changes = self.take_fragment_changes();
        Task::batch((0..changes).map(|_| Task::done(Message::FragmentChanged)))
    }

    /// Start downloads for product images not requested yet
    fn load_images(&mut self) -> Task<Message> {
        let urls = self.images.request(
            self.controller
                .catalog()
                .products
                .iter()
                .map(|product| product.image_url.as_str()),
        );

        Task::batch(urls.into_iter().map(|url| {
            let download = self.api.fetch_image(&url);
            Task::perform(download, move |result| Message::ImageLoaded(url.clone(), result))
        }))
    }

    /// Run the catalog request identified by `ticket` in the background
    fn fetch(&self, ticket: FetchTicket) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(async move { api.fetch_products().await }, move |result| {
            Message::CatalogLoaded(ticket, result)
        })
    }

    /// Build the user interface
    pub fn view(&self) -> Element<Message> {
        let frame = self.controller.surface().frame().cloned();
        let history = self.controller.navigator();

        let body = match &frame {
            Some(frame) => ui::view::region(&frame.region, &self.images),
            None => ui::view::region(&Region::Loading, &self.images),
        };

        let base = container(
            column![
                text("Brew Catalog").size(32),
                ui::view::location_bar(
                    &self.location_draft,
                    history.can_go_back(),
                    history.can_go_forward()
                ),
                ui::view::search_bar(self.controller.input().value()),
                body,
            ]
            .spacing(16)
            .padding(24),
        )
        .width(Length::Fill)
        .height(Length::Fill);

        match frame.and_then(|frame| frame.overlay) {
            Some(product) => {
                ui::view::overlay(base.into(), &product, &self.images, &self.order_menu)
            }
            None => base.into(),
        }
    }

    /// Escape closes the detail overlay
    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(close_on_escape)
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn close_on_escape(pressed: keyboard::Key, _modifiers: Modifiers) -> Option<Message> {
    match pressed {
        keyboard::Key::Named(key::Named::Escape) => Some(Message::CloseOverlay),
        _ => None,
    }
}
