//! Merchant catalog
//!
//! A fixed list of wares with fixed prices. Stock never runs out and
//! nothing about the shop is saved.

use thiserror::Error;

use super::item::{templates, Item, ItemKind};
use crate::entities::Player;

/// Why a purchase was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("there is nobody to sell to")]
    NoCustomer,
    #[error("there is no item number {0}")]
    InvalidIndex(usize),
    #[error("not enough gold: {name} costs {price}, you have {gold}")]
    InsufficientGold { name: String, price: u32, gold: u32 },
}

/// The merchant's wares
#[derive(Debug, Clone)]
pub struct Shop {
    items: Vec<Item>,
    prices: Vec<(String, u32)>,
}

impl Shop {
    pub fn new() -> Self {
        let stock = [
            (templates::small_health_potion(), 20),
            (templates::large_health_potion(), 40),
            (Item::new("Steel Sword", "+5 damage", ItemKind::Weapon, 5), 50),
            (Item::new("Mithril Sword", "+10 damage", ItemKind::Weapon, 10), 100),
            (Item::new("Leather Armor", "+3 defense", ItemKind::Armor, 3), 30),
            (Item::new("Steel Armor", "+7 defense", ItemKind::Armor, 7), 70),
            (Item::new("Treasure Map", "Points to the nearest treasure", ItemKind::Other, 0), 25),
            (templates::torch(), 15),
        ];

        let prices = stock.iter().map(|(item, price)| (item.name.clone(), *price)).collect();
        let items = stock.into_iter().map(|(item, _)| item).collect();
        Self { items, prices }
    }

    /// All wares in display order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Price of an item by name
    pub fn price_of(&self, name: &str) -> Option<u32> {
        self.prices
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, price)| *price)
    }

    /// Wares with their prices, in display order
    pub fn listing(&self) -> impl Iterator<Item = (&Item, u32)> + '_ {
        self.items
            .iter()
            .map(move |item| (item, self.price_of(&item.name).unwrap_or(0)))
    }

    /// Buy the ware at `index` (0-based). Gold is only taken on success.
    pub fn buy(&self, player: &mut Player, index: usize) -> Result<Item, ShopError> {
        let item = self
            .items
            .get(index)
            .ok_or(ShopError::InvalidIndex(index + 1))?;
        let price = self.price_of(&item.name).unwrap_or(0);

        if player.gold < price {
            return Err(ShopError::InsufficientGold {
                name: item.name.clone(),
                price,
                gold: player.gold,
            });
        }

        player.gold -= price;
        player.add_item(item.clone());
        log::debug!("{} bought {} for {}", player.name, item.name, price);
        Ok(item.clone())
    }
}

impl Default for Shop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_eight_priced_items() {
        let shop = Shop::new();
        assert_eq!(shop.items().len(), 8);
        for item in shop.items() {
            assert!(shop.price_of(&item.name).is_some(), "{} has no price", item.name);
        }
        assert_eq!(shop.price_of("Small Health Potion"), Some(20));
        assert_eq!(shop.price_of("Torch"), Some(15));
    }

    #[test]
    fn test_purchase_deducts_gold() {
        let shop = Shop::new();
        let mut player = Player::new("Buyer");
        let item = shop.buy(&mut player, 2).unwrap();
        assert_eq!(item.name, "Steel Sword");
        assert_eq!(player.gold, 50);
        assert_eq!(player.inventory, vec![item]);
    }

    #[test]
    fn test_broke_player_cannot_buy() {
        let shop = Shop::new();
        let mut player = Player::new("Pauper");
        player.gold = 0;
        let err = shop.buy(&mut player, 0).unwrap_err();
        assert_eq!(
            err,
            ShopError::InsufficientGold {
                name: "Small Health Potion".to_string(),
                price: 20,
                gold: 0,
            }
        );
        assert_eq!(player.gold, 0);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn test_invalid_index() {
        let shop = Shop::new();
        let mut player = Player::new("Buyer");
        assert_eq!(shop.buy(&mut player, 8), Err(ShopError::InvalidIndex(9)));
        assert_eq!(player.gold, 100);
    }

    #[test]
    fn test_stock_is_not_depleted() {
        let shop = Shop::new();
        let mut player = Player::new("Buyer");
        player.gold = 1_000;
        for _ in 0..5 {
            shop.buy(&mut player, 7).unwrap();
        }
        assert_eq!(shop.items().len(), 8);
        assert_eq!(player.gold, 1_000 - 5 * 15);
    }
}
