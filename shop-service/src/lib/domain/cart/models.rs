use crate::domain::cart::errors::LineQuantityError;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::ProductSlug;
use crate::domain::user::models::UserId;

/// Number of units of one product in a cart. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineQuantity(i32);

impl LineQuantity {
    pub fn new(quantity: i32) -> Result<Self, LineQuantityError> {
        if quantity < 1 {
            Err(LineQuantityError::NotPositive(quantity))
        } else {
            Ok(Self(quantity))
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// One product in a cart, joined with the product's current name and price.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub slug: ProductSlug,
    pub name: ProductName,
    pub unit_price: Price,
    pub quantity: LineQuantity,
}

impl CartLine {
    /// Exact for every valid line, since `Price::MAX * i32::MAX` fits in an `i64`.
    pub fn line_total(&self) -> i64 {
        self.unit_price.amount() * i64::from(self.quantity.value())
    }
}

/// A user's shopping cart.
///
/// Prices are read live from the catalogue, so totals follow price changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub user_id: UserId,
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            lines: Vec::new(),
        }
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product_id == product_id)
    }

    /// Sum of all line totals, or `None` if it does not fit in an `i64`.
    pub fn total(&self) -> Option<i64> {
        self.lines
            .iter()
            .try_fold(0i64, |total, line| total.checked_add(line.line_total()))
    }

    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .map(|line| i64::from(line.quantity.value()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, quantity: i32) -> CartLine {
        CartLine {
            product_id: ProductId::new(),
            slug: ProductSlug::new("rose-oil".to_string()).unwrap(),
            name: ProductName::new("Rose Oil".to_string()).unwrap(),
            unit_price: Price::new(price).unwrap(),
            quantity: LineQuantity::new(quantity).unwrap(),
        }
    }

    #[test]
    fn test_quantity_must_be_positive() {
        assert_eq!(LineQuantity::new(0), Err(LineQuantityError::NotPositive(0)));
        assert_eq!(LineQuantity::new(-2), Err(LineQuantityError::NotPositive(-2)));
        assert_eq!(LineQuantity::new(1).unwrap().value(), 1);
    }

    #[test]
    fn test_totals() {
        let cart = Cart {
            user_id: UserId::new(),
            lines: vec![line(250, 2), line(1000, 1)],
        };

        assert_eq!(cart.lines[0].line_total(), 500);
        assert_eq!(cart.total(), Some(1500));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_largest_line_is_exact_and_overflowing_total_is_none() {
        let largest = line(Price::MAX, i32::MAX);
        assert_eq!(largest.line_total(), Price::MAX * i64::from(i32::MAX));

        let cart = Cart {
            user_id: UserId::new(),
            lines: vec![largest.clone(), largest],
        };
        assert_eq!(cart.total(), None);
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::empty(UserId::new());
        assert_eq!(cart.total(), Some(0));
        assert!(cart.line(&ProductId::new()).is_none());
    }
}
