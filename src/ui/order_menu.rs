/// Nested order menu
///
/// A toggle button opens a list of containers; expanding one container
/// reveals its quantities and collapses the others. Choosing a quantity
/// places the order and closes everything.

use tracing::info;

/// Containers offered in the menu
pub const ORDER_ITEMS: [&str; 3] = ["Glass", "Can", "Box"];

/// Quantities offered for every container
pub const ORDER_QUANTITIES: [&str; 3] = ["1", "2", "3"];

/// A placed order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub item: &'static str,
    pub quantity: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMenuMessage {
    /// Open or close the whole menu
    Toggle,
    /// Show or hide the quantities of one container
    Expand(usize),
    /// Pick a quantity of a container
    Choose { item: usize, quantity: usize },
}

/// Open/expanded state of the menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderMenu {
    open: bool,
    expanded: Option<usize>,
}

impl OrderMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the container whose quantities are showing
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Collapse everything
    pub fn close(&mut self) {
        self.open = false;
        self.expanded = None;
    }

    /// Apply a menu interaction; returns the order when one was placed
    pub fn update(&mut self, message: OrderMenuMessage) -> Option<Order> {
        match message {
            OrderMenuMessage::Toggle => {
                self.open = !self.open;
                if !self.open {
                    self.expanded = None;
                }
                None
            }
            OrderMenuMessage::Expand(item) => {
                if item < ORDER_ITEMS.len() {
                    self.expanded = if self.expanded == Some(item) {
                        None
                    } else {
                        Some(item)
                    };
                }
                None
            }
            OrderMenuMessage::Choose { item, quantity } => {
                let order = Order {
                    item: *ORDER_ITEMS.get(item)?,
                    quantity: *ORDER_QUANTITIES.get(quantity)?,
                };
                info!(item = order.item, quantity = order.quantity, "Order selected");
                self.close();
                Some(order)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_opens_and_closes() {
        let mut menu = OrderMenu::default();

        menu.update(OrderMenuMessage::Toggle);
        assert!(menu.is_open());

        menu.update(OrderMenuMessage::Expand(1));
        menu.update(OrderMenuMessage::Toggle);
        assert!(!menu.is_open());
        assert_eq!(menu.expanded(), None);
    }

    #[test]
    fn test_expanding_one_item_collapses_others() {
        let mut menu = OrderMenu::default();
        menu.update(OrderMenuMessage::Toggle);

        menu.update(OrderMenuMessage::Expand(0));
        menu.update(OrderMenuMessage::Expand(2));
        assert_eq!(menu.expanded(), Some(2));

        menu.update(OrderMenuMessage::Expand(2));
        assert_eq!(menu.expanded(), None);
    }

    #[test]
    fn test_choose_places_order_and_closes() {
        let mut menu = OrderMenu::default();
        menu.update(OrderMenuMessage::Toggle);
        menu.update(OrderMenuMessage::Expand(1));

        let order = menu.update(OrderMenuMessage::Choose { item: 1, quantity: 2 });

        assert_eq!(order, Some(Order { item: "Can", quantity: "3" }));
        assert_eq!(menu, OrderMenu::default());
    }

    #[test]
    fn test_out_of_range_choice_is_ignored() {
        let mut menu = OrderMenu::default();
        menu.update(OrderMenuMessage::Toggle);

        assert_eq!(menu.update(OrderMenuMessage::Choose { item: 9, quantity: 0 }), None);
        assert!(menu.is_open());
    }
}
