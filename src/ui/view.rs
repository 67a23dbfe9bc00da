/// Widget construction
///
/// Pure functions from view state to iced elements. No state lives here;
/// every interaction is reported back as a [`Message`].

use iced::widget::{
    button, center, column, container, horizontal_space, image, mouse_area, opaque, row,
    scrollable, stack, text, text_input, Column, Row,
};
use iced::{Alignment, Border, Color, Element, Length, Theme};
use iced_aw::Wrap;

use crate::catalog::ibu::IbuTier;
use crate::state::data::Product;
use crate::ui::images::{ImageCache, ImageSlot};
use crate::ui::order_menu::{OrderMenu, OrderMenuMessage, ORDER_ITEMS, ORDER_QUANTITIES};
use crate::ui::projector::{EmptyKind, Region};
use crate::app::Message;

/// Width of a product card in the grid
const CARD_WIDTH: f32 = 180.0;

/// Height of the image on a product card
const CARD_IMAGE_HEIGHT: f32 = 240.0;

/// Side of the square image in the detail overlay
const OVERLAY_IMAGE_SIZE: f32 = 240.0;

/// Accent colour for a bitterness tier
fn tier_color(tier: IbuTier) -> Color {
    match tier {
        IbuTier::Low => Color::from_rgb(0.45, 0.75, 0.45),
        IbuTier::Medium => Color::from_rgb(0.90, 0.75, 0.30),
        IbuTier::High => Color::from_rgb(0.90, 0.50, 0.20),
        IbuTier::VeryHigh => Color::from_rgb(0.85, 0.25, 0.25),
    }
}

/// Back/forward buttons and the editable location fragment
pub fn location_bar<'a>(draft: &'a str, can_back: bool, can_forward: bool) -> Element<'a, Message> {
    row![
        button(text("Back")).on_press_maybe(can_back.then_some(Message::Back)),
        button(text("Forward")).on_press_maybe(can_forward.then_some(Message::Forward)),
        text_input("#/", draft)
            .on_input(Message::LocationEdited)
            .on_submit(Message::LocationSubmitted)
            .padding(6),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

/// The search text input
pub fn search_bar(value: &str) -> Element<'_, Message> {
    text_input("Search by name or IBU", value)
        .on_input(Message::SearchChanged)
        .padding(10)
        .size(16)
        .into()
}

/// A product image, or a placeholder while it loads or when it is missing
fn picture<'a>(slot: ImageSlot<'_>, width: f32, height: f32) -> Element<'a, Message> {
    let label = match slot {
        ImageSlot::Ready(handle) => {
            return image(handle.clone())
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .into();
        }
        ImageSlot::Loading => "Loading",
        ImageSlot::Unavailable => "No Image",
    };

    center(text(label).size(12))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .style(container::rounded_box)
        .into()
}

/// The active base region
pub fn region<'a>(active: &Region, images: &ImageCache) -> Element<'a, Message> {
    match active {
        Region::Loading => center(text("Loading catalog...").size(18)).into(),
        Region::Error(message) => center(
            column![
                text(format!("Error fetching data: {message}")).size(16),
                button(text("Retry")).on_press(Message::Retry).padding(10),
            ]
            .spacing(12)
            .align_x(Alignment::Center),
        )
        .into(),
        Region::Empty(EmptyKind::NoProducts) => {
            center(text("No products available.").size(18)).into()
        }
        Region::Empty(EmptyKind::NoMatches) => {
            center(text("No products match your search.").size(18)).into()
        }
        Region::Grid(products) => {
            let cards = products
                .iter()
                .map(|product| product_card(product, images))
                .collect();
            scrollable(Wrap::with_elements(cards).spacing(12.0).line_spacing(12.0))
                .height(Length::Fill)
                .into()
        }
    }
}

fn product_card<'a>(product: &Product, images: &ImageCache) -> Element<'a, Message> {
    let tier = IbuTier::from_ibu(product.ibu);
    let accent = tier_color(tier);

    let content = column![
        row![
            text(format!("{}%", product.abv)).size(12),
            horizontal_space(),
            text(format!("IBU {}", product.ibu)).size(12).color(accent),
        ],
        picture(images.slot(&product.image_url), CARD_WIDTH, CARD_IMAGE_HEIGHT),
        text(product.name.clone()).size(18),
        text(tier.label()).size(11).color(accent),
    ]
    .spacing(8)
    .width(Length::Fixed(CARD_WIDTH));

    let card = container(content)
        .padding(12)
        .style(move |theme: &Theme| container::Style {
            border: Border {
                color: accent,
                width: 2.0,
                radius: 8.0.into(),
            },
            ..container::rounded_box(theme)
        });

    mouse_area(card)
        .on_press(Message::CardActivated(product.id))
        .into()
}

/// Lay the detail overlay for `product` over `base`.
///
/// Clicking the backdrop closes the overlay.
pub fn overlay<'a>(
    base: Element<'a, Message>,
    product: &Product,
    images: &ImageCache,
    menu: &OrderMenu,
) -> Element<'a, Message> {
    let accent = tier_color(IbuTier::from_ibu(product.ibu));
    let description = if product.description.is_empty() {
        "No description available.".to_string()
    } else {
        product.description.clone()
    };

    let details = column![
        row![
            text(product.name.clone()).size(28),
            horizontal_space(),
            button(text("Close")).on_press(Message::CloseOverlay),
        ]
        .align_y(Alignment::Center),
        row![
            picture(
                images.slot(&product.image_url),
                OVERLAY_IMAGE_SIZE,
                OVERLAY_IMAGE_SIZE
            ),
            column![
                text(format!("ABV {}%", product.abv)).size(16),
                text(format!("IBU {}", product.ibu)).size(16).color(accent),
                text(description).size(14),
            ]
            .spacing(12),
        ]
        .spacing(16),
        order_menu(menu),
    ]
    .spacing(16)
    .max_width(640.0);

    let dialog = container(details)
        .padding(24)
        .style(container::rounded_box);

    stack![
        base,
        opaque(
            mouse_area(center(opaque(dialog)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.8,
                        ..Color::BLACK
                    }
                    .into()
                ),
                ..container::Style::default()
            }))
            .on_press(Message::CloseOverlay)
        )
    ]
    .into()
}

fn order_menu<'a>(menu: &OrderMenu) -> Element<'a, Message> {
    let label = if menu.is_open() { "Order (close)" } else { "Order" };
    let mut items = Column::new()
        .spacing(6)
        .push(button(text(label)).on_press(Message::OrderMenu(OrderMenuMessage::Toggle)));

    if !menu.is_open() {
        return items.into();
    }

    for (item, name) in ORDER_ITEMS.iter().enumerate() {
        items = items.push(
            button(text(*name)).on_press(Message::OrderMenu(OrderMenuMessage::Expand(item))),
        );

        if menu.expanded() == Some(item) {
            let quantities = ORDER_QUANTITIES.iter().enumerate().fold(
                Row::new().spacing(6),
                |buttons, (quantity, label)| {
                    buttons.push(button(text(*label)).on_press(Message::OrderMenu(
                        OrderMenuMessage::Choose { item, quantity },
                    )))
                },
            );
            items = items.push(container(quantities).padding([0, 16]));
        }
    }

    items.into()
}
