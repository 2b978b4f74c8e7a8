//! Demo mode with a pre-populated travel catalog.
//!
//! Seeds an in-memory store with a few items of every kind so the commands
//! can be tried without a backend.

use chrono::{DateTime, TimeZone, Utc};
use wayfarer_core::catalog::{
    AdventureDetails, BlogDetails, GalleryDetails, LicensePrices, ReelDetails,
};
use wayfarer_core::{CatalogItem, Difficulty, ItemDetails, ItemId, MemoryStore};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn item(
    id: &str,
    title: &str,
    slug: &str,
    category: &str,
    asset: &str,
    created_at: DateTime<Utc>,
    details: ItemDetails,
) -> CatalogItem {
    CatalogItem {
        id: ItemId::new(id),
        title: title.to_string(),
        slug: slug.to_string(),
        category: category.to_string(),
        primary_asset: asset.to_string(),
        created_at,
        details,
    }
}

/// Blog posts.
pub fn demo_blogs() -> Vec<CatalogItem> {
    vec![
        item(
            "blog-1",
            "Street Food of Lahore",
            "street-food-of-lahore",
            "Food",
            "https://images.example/lahore-food.jpg",
            at(2, 9),
            ItemDetails::Blog(BlogDetails {
                excerpt: Some("Nihari at dawn, chai at midnight.".into()),
                content: "<p>Lahore never sleeps, and neither do its kitchens.</p>".into(),
                author: "Ayesha Khan".into(),
                tags: vec!["lahore".into(), "street food".into()],
                read_time: Some("7 min read".into()),
                featured: true,
                ..Default::default()
            }),
        ),
        item(
            "blog-2",
            "Truck Art on the Karakoram Highway",
            "truck-art-on-the-karakoram-highway",
            "Culture",
            "https://images.example/truck-art.jpg",
            at(9, 14),
            ItemDetails::Blog(BlogDetails {
                content: "<p>Every truck is a travelling gallery.</p>".into(),
                author: "Bilal Ahmed".into(),
                video_id: Some("kkh-trucks".into()),
                ..Default::default()
            }),
        ),
        item(
            "blog-3",
            "Packing for the Northern Areas",
            "packing-for-the-northern-areas",
            "Travel Tips",
            "https://images.example/packing.jpg",
            at(15, 8),
            ItemDetails::Blog(BlogDetails {
                content: "<p>Layers, a headlamp and patience.</p>".into(),
                author: "Ayesha Khan".into(),
                tags: vec!["gear".into()],
                ..Default::default()
            }),
        ),
    ]
}

/// Gallery photographs.
pub fn demo_gallery() -> Vec<CatalogItem> {
    let prices = |personal, commercial, exclusive| LicensePrices {
        personal,
        commercial,
        exclusive,
    };
    vec![
        item(
            "photo-1",
            "Attabad Lake at Noon",
            "attabad-lake-at-noon",
            "Lakes",
            "https://images.example/attabad.jpg",
            at(3, 12),
            ItemDetails::Gallery(GalleryDetails {
                location: "Hunza".into(),
                description: "Turquoise water under a cloudless sky.".into(),
                license: prices(25, 120, 900),
            }),
        ),
        item(
            "photo-2",
            "Passu Cones",
            "passu-cones",
            "Mountains",
            "https://images.example/passu.jpg",
            at(6, 17),
            ItemDetails::Gallery(GalleryDetails {
                location: "Gojal".into(),
                description: "Cathedral spires in late light.".into(),
                license: prices(30, 150, 1200),
            }),
        ),
        item(
            "photo-3",
            "Badshahi Mosque Courtyard",
            "badshahi-mosque-courtyard",
            "Architecture",
            "https://images.example/badshahi.jpg",
            at(11, 7),
            ItemDetails::Gallery(GalleryDetails {
                location: "Lahore".into(),
                description: "Red sandstone at first light.".into(),
                license: prices(20, 100, 750),
            }),
        ),
    ]
}

/// Adventure vlogs.
pub fn demo_adventures() -> Vec<CatalogItem> {
    vec![
        item(
            "adv-1",
            "Fairy Meadows Trek",
            "fairy-meadows-trek",
            "Adventure",
            "https://images.example/fairy-meadows.jpg",
            at(4, 6),
            ItemDetails::Adventure(AdventureDetails {
                location: "Fairy Meadows".into(),
                description: "Jeep track, then a long climb to Nanga Parbat views.".into(),
                video_id: "fm-trek-01".into(),
                duration: Some("24:10".into()),
                difficulty: Difficulty::Challenging,
                content_images: vec!["https://images.example/fm-camp.jpg".into()],
            }),
        ),
        item(
            "adv-2",
            "Deosai Plains by Bike",
            "deosai-plains-by-bike",
            "Moto Vlogs",
            "https://images.example/deosai.jpg",
            at(12, 10),
            ItemDetails::Adventure(AdventureDetails {
                location: "Deosai National Park".into(),
                description: "Two days above 4000m on two wheels.".into(),
                video_id: "deosai-moto".into(),
                duration: Some("18:42".into()),
                difficulty: Difficulty::Extreme,
                content_images: Vec::new(),
            }),
        ),
        item(
            "adv-3",
            "A Week in Skardu",
            "a-week-in-skardu",
            "Travel Vlogs",
            "https://images.example/skardu.jpg",
            at(20, 16),
            ItemDetails::Adventure(AdventureDetails {
                location: "Skardu".into(),
                description: "Lakes, forts and cold desert.".into(),
                video_id: "skardu-week".into(),
                duration: None,
                difficulty: Difficulty::Easy,
                content_images: Vec::new(),
            }),
        ),
    ]
}

/// Reels.
pub fn demo_reels() -> Vec<CatalogItem> {
    vec![
        item(
            "reel-1",
            "Sunset at Hunza",
            "sunset-at-hunza",
            "Photography",
            "https://videos.example/hunza-sunset.mp4",
            at(5, 19),
            ItemDetails::Reel(ReelDetails {
                duration: Some("0:30".into()),
                views: 18_400,
            }),
        ),
        item(
            "reel-2",
            "Making Chapli Kebab",
            "making-chapli-kebab",
            "Food",
            "https://videos.example/chapli.mp4",
            at(13, 13),
            ItemDetails::Reel(ReelDetails {
                duration: Some("0:45".into()),
                views: 52_100,
            }),
        ),
    ]
}

/// A store holding every demo item.
pub fn demo_store() -> MemoryStore {
    let store = MemoryStore::new();
    demo_blogs()
        .into_iter()
        .chain(demo_gallery())
        .chain(demo_adventures())
        .chain(demo_reels())
        .for_each(|item| store.seed(item));
    store
}

#[cfg(test)]
mod tests {
    use wayfarer_core::CatalogKind;

    use super::*;

    #[test]
    fn test_demo_store_has_every_kind() {
        let store = demo_store();
        for kind in CatalogKind::ALL {
            assert!(!store.is_empty(kind), "no demo items for {}", kind);
        }
    }

    #[test]
    fn test_demo_slugs_match_titles() {
        for item in demo_blogs()
            .into_iter()
            .chain(demo_gallery())
            .chain(demo_adventures())
            .chain(demo_reels())
        {
            assert_eq!(item.slug, wayfarer_core::slugify(&item.title));
        }
    }
}
