//! Free-text product type to constrained taxonomy mapping.
//!
//! Storefronts put anything in `product_type` ("Tees", "Mens Hoodies",
//! "drinkware"). The import format's `Product Category` column wants a
//! value from a fixed taxonomy, so we map by lowercase substring match
//! against an ordered table. The first matching entry wins — order
//! matters, e.g. `"t-shirt"` and `"tee"` must be checked before `"tea"`.

/// Ordered substring-match table. More specific keys come first.
const CATEGORY_MAP: &[(&str, &str)] = &[
    ("t-shirt", "Apparel & Accessories > Clothing > Shirts & Tops"),
    ("tee", "Apparel & Accessories > Clothing > Shirts & Tops"),
    ("shirt", "Apparel & Accessories > Clothing > Shirts & Tops"),
    ("hoodie", "Apparel & Accessories > Clothing > Activewear > Sweatshirts"),
    ("sweatshirt", "Apparel & Accessories > Clothing > Activewear > Sweatshirts"),
    ("sweater", "Apparel & Accessories > Clothing > Sweaters & Cardigans"),
    ("jacket", "Apparel & Accessories > Clothing > Outerwear > Coats & Jackets"),
    ("coat", "Apparel & Accessories > Clothing > Outerwear > Coats & Jackets"),
    ("dress", "Apparel & Accessories > Clothing > Dresses"),
    ("jean", "Apparel & Accessories > Clothing > Pants"),
    ("pant", "Apparel & Accessories > Clothing > Pants"),
    ("short", "Apparel & Accessories > Clothing > Shorts"),
    ("sneaker", "Apparel & Accessories > Shoes"),
    ("shoe", "Apparel & Accessories > Shoes"),
    ("boot", "Apparel & Accessories > Shoes"),
    ("sandal", "Apparel & Accessories > Shoes"),
    ("beanie", "Apparel & Accessories > Clothing Accessories > Hats"),
    ("hat", "Apparel & Accessories > Clothing Accessories > Hats"),
    ("cap", "Apparel & Accessories > Clothing Accessories > Hats"),
    ("sock", "Apparel & Accessories > Clothing > Underwear & Socks > Socks"),
    ("backpack", "Luggage & Bags > Backpacks"),
    ("wallet", "Apparel & Accessories > Handbags, Wallets & Cases > Wallets & Money Clips"),
    ("bag", "Apparel & Accessories > Handbags, Wallets & Cases"),
    ("necklace", "Apparel & Accessories > Jewelry > Necklaces"),
    ("bracelet", "Apparel & Accessories > Jewelry > Bracelets"),
    ("earring", "Apparel & Accessories > Jewelry > Earrings"),
    ("ring", "Apparel & Accessories > Jewelry > Rings"),
    ("jewelry", "Apparel & Accessories > Jewelry"),
    ("candle", "Home & Garden > Decor > Home Fragrances > Candles"),
    ("mug", "Home & Garden > Kitchen & Dining > Tableware > Drinkware > Mugs"),
    ("drinkware", "Home & Garden > Kitchen & Dining > Tableware > Drinkware"),
    ("cup", "Home & Garden > Kitchen & Dining > Tableware > Drinkware"),
    ("poster", "Home & Garden > Decor > Artwork > Posters, Prints, & Visual Artwork"),
    ("print", "Home & Garden > Decor > Artwork > Posters, Prints, & Visual Artwork"),
    ("sticker", "Arts & Entertainment > Hobbies & Creative Arts > Arts & Crafts"),
    ("book", "Media > Books"),
    ("toy", "Toys & Games > Toys"),
    ("game", "Toys & Games > Games"),
    ("coffee", "Food, Beverages & Tobacco > Beverages > Coffee"),
    ("tea", "Food, Beverages & Tobacco > Beverages > Tea & Infusions"),
    ("beverage", "Food, Beverages & Tobacco > Beverages"),
    ("drink", "Food, Beverages & Tobacco > Beverages"),
    ("snack", "Food, Beverages & Tobacco > Food Items"),
    ("food", "Food, Beverages & Tobacco > Food Items"),
    ("supplement", "Health & Beauty > Health Care > Fitness & Nutrition > Vitamins & Supplements"),
    ("skin care", "Health & Beauty > Personal Care > Cosmetics > Skin Care"),
    ("skincare", "Health & Beauty > Personal Care > Cosmetics > Skin Care"),
    ("soap", "Health & Beauty > Personal Care"),
];

/// Fallback category for a non-empty type string no table entry matches.
const DEFAULT_CATEGORY: &str = "Apparel & Accessories";

/// Maps a free-text product type to a taxonomy value.
///
/// Empty input maps to an empty category; unmatched non-empty input falls
/// back to [`DEFAULT_CATEGORY`].
#[must_use]
pub fn map_product_type(product_type: &str) -> String {
    let trimmed = product_type.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_lowercase();
    for (key, category) in CATEGORY_MAP {
        if lower.contains(key) {
            return (*category).to_owned();
        }
    }
    DEFAULT_CATEGORY.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_type_maps_to_empty_category() {
        assert_eq!(map_product_type(""), "");
        assert_eq!(map_product_type("   "), "");
    }

    #[test]
    fn shirt_maps_to_shirts_and_tops() {
        assert_eq!(
            map_product_type("Mens Shirts"),
            "Apparel & Accessories > Clothing > Shirts & Tops"
        );
    }

    #[test]
    fn match_is_case_insensitive() {
        assert_eq!(
            map_product_type("HOODIE"),
            "Apparel & Accessories > Clothing > Activewear > Sweatshirts"
        );
    }

    #[test]
    fn tee_wins_over_tea() {
        // "Graphic Tees" contains both "tee" and (per substring) no "tea";
        // the ordering guarantee matters for a type like "Teatime Tees".
        assert_eq!(
            map_product_type("Teatime Tees"),
            "Apparel & Accessories > Clothing > Shirts & Tops"
        );
    }

    #[test]
    fn tea_maps_to_infusions() {
        assert_eq!(
            map_product_type("Loose Leaf Tea"),
            "Food, Beverages & Tobacco > Beverages > Tea & Infusions"
        );
    }

    #[test]
    fn first_table_entry_wins() {
        // Contains both "jacket" and "bag"; "jacket" appears earlier.
        assert_eq!(
            map_product_type("Jacket Bag Bundle"),
            "Apparel & Accessories > Clothing > Outerwear > Coats & Jackets"
        );
    }

    #[test]
    fn unmatched_type_falls_back_to_default() {
        assert_eq!(map_product_type("Gadgetry"), DEFAULT_CATEGORY);
    }
}
