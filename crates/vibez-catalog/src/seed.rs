//! # Seed Data
//!
//! The built-in marketplace the storefront starts with: three vendors,
//! eight products and four banner requests.
//!
//! ## Seeded Vendors
//! | Id      | Name         | Status   | Commission | Plan       |
//! |---------|--------------|----------|------------|------------|
//! | vendor1 | Fashion Hub  | approved | 10%        | premium    |
//! | vendor2 | Style Studio | approved | 12%        | basic      |
//! | vendor3 | Trend Zone   | pending  | 8%         | enterprise |
//!
//! Product 5 (Summer Dress) is pending review, so customers see seven
//! products out of the box.

use chrono::NaiveDate;
use tracing::warn;
use vibez_core::{
    Banner, BannerPackage, BannerStatus, Category, Gender, Money, Product, ProductId,
    ProductStatus, SubscriptionPlan, Vendor, VendorStatus,
};

/// (id, name, rupees, category, gender, vendor, status, sizes, rating, description)
type ProductRow = (
    ProductId,
    &'static str,
    i64,
    Category,
    Gender,
    &'static str,
    ProductStatus,
    &'static [&'static str],
    f64,
    &'static str,
);

const PRODUCTS: &[ProductRow] = &[
    (
        1,
        "Classic Cotton T-Shirt",
        499,
        Category::Tops,
        Gender::Men,
        "vendor1",
        ProductStatus::Approved,
        &["S", "M", "L", "XL"],
        4.5,
        "Comfortable cotton t-shirt for everyday wear",
    ),
    (
        2,
        "Slim Fit Jeans",
        1299,
        Category::Bottoms,
        Gender::Men,
        "vendor1",
        ProductStatus::Approved,
        &["28", "30", "32", "34"],
        4.7,
        "Modern slim fit jeans with stretch",
    ),
    (
        3,
        "Running Shoes",
        2499,
        Category::Shoes,
        Gender::Unisex,
        "vendor2",
        ProductStatus::Approved,
        &["7", "8", "9", "10"],
        4.8,
        "Comfortable running shoes for athletes",
    ),
    (
        4,
        "Leather Wallet",
        899,
        Category::Accessories,
        Gender::Men,
        "vendor2",
        ProductStatus::Approved,
        &["One Size"],
        4.3,
        "Genuine leather wallet with multiple compartments",
    ),
    (
        5,
        "Summer Dress",
        1599,
        Category::Tops,
        Gender::Women,
        "vendor3",
        ProductStatus::Pending,
        &["S", "M", "L"],
        4.6,
        "Light and breezy summer dress",
    ),
    (
        6,
        "Sports Jacket",
        2999,
        Category::Tops,
        Gender::Men,
        "vendor1",
        ProductStatus::Approved,
        &["S", "M", "L", "XL"],
        4.9,
        "Waterproof sports jacket for outdoor activities",
    ),
    (
        7,
        "Casual Shorts",
        799,
        Category::Bottoms,
        Gender::Men,
        "vendor2",
        ProductStatus::Approved,
        &["S", "M", "L", "XL"],
        4.2,
        "Comfortable casual shorts for summer",
    ),
    (
        8,
        "Sunglasses",
        599,
        Category::Accessories,
        Gender::Unisex,
        "vendor3",
        ProductStatus::Approved,
        &["One Size"],
        4.4,
        "UV protection sunglasses with stylish design",
    ),
];

/// Products that carry a merchandising badge.
const BADGES: &[(ProductId, &str)] = &[(3, "HOT"), (6, "TRENDING")];

pub fn vendors() -> Vec<Vendor> {
    let vendor = |id: &str, name: &str, status, commission, plan| Vendor {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", id),
        status,
        commission,
        subscription_plan: plan,
    };

    vec![
        vendor("vendor1", "Fashion Hub", VendorStatus::Approved, 10, SubscriptionPlan::Premium),
        vendor("vendor2", "Style Studio", VendorStatus::Approved, 12, SubscriptionPlan::Basic),
        vendor("vendor3", "Trend Zone", VendorStatus::Pending, 8, SubscriptionPlan::Enterprise),
    ]
}

pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(
            |&(id, name, rupees, category, gender, vendor_id, status, sizes, rating, description)| {
                let badge = BADGES
                    .iter()
                    .find(|(product_id, _)| *product_id == id)
                    .map(|(_, badge)| badge.to_string());
                Product {
                    id,
                    name: name.to_string(),
                    price: Money::from_rupees(rupees),
                    category,
                    gender,
                    vendor_id: vendor_id.to_string(),
                    status,
                    sizes: sizes.iter().map(|s| s.to_string()).collect(),
                    rating: Some(rating),
                    description: Some(description.to_string()),
                    image: Some(format!("/images/product{}.jpg", id)),
                    trending: badge.is_some(),
                    badge,
                    discount: None,
                }
            },
        )
        .collect()
}

/// (id, vendor, title, description, package, status, start, views, clicks)
type BannerRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    BannerPackage,
    BannerStatus,
    (i32, u32, u32),
    u64,
    u64,
);

const BANNERS: &[BannerRow] = &[
    (
        "banner1",
        "vendor1",
        "Summer Sale - Up to 50% Off",
        "Get amazing discounts on our summer collection",
        BannerPackage::Premium,
        BannerStatus::Active,
        (2024, 1, 15),
        12_500,
        890,
    ),
    (
        "banner2",
        "vendor2",
        "New Collection Launch",
        "Check out our latest fashion trends",
        BannerPackage::Basic,
        BannerStatus::Active,
        (2024, 1, 10),
        8_900,
        456,
    ),
    (
        "banner3",
        "vendor3",
        "Mega Fashion Festival",
        "Biggest sale of the year with exclusive offers",
        BannerPackage::Platinum,
        BannerStatus::Active,
        (2024, 1, 5),
        45_600,
        3_200,
    ),
    (
        "banner4",
        "vendor1",
        "Winter Essentials",
        "Layer up with the new winter range",
        BannerPackage::Premium,
        BannerStatus::Pending,
        (2024, 2, 1),
        0,
        0,
    ),
];

pub fn banners() -> Vec<Banner> {
    BANNERS
        .iter()
        .filter_map(
            |&(id, vendor_id, title, description, package, status, (y, m, d), views, clicks)| {
                let requested = NaiveDate::from_ymd_opt(y, m, d)
                    .ok_or_else(|| format!("{}-{}-{} is not a date", y, m, d))
                    .and_then(|starts_on| {
                        Banner::request(id, vendor_id, title, description, package, starts_on)
                            .map_err(|e| e.to_string())
                    });

                match requested {
                    Ok(mut banner) => {
                        banner.status = status;
                        banner.views = views;
                        banner.clicks = clicks;
                        banner.link = Some(format!("/vendor/{}", vendor_id));
                        Some(banner)
                    }
                    Err(reason) => {
                        warn!(banner_id = id, reason = %reason, "Skipping seed banner");
                        None
                    }
                }
            },
        )
        .collect()
}
