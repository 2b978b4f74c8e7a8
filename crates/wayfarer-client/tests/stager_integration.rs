//! Object-store staging through the creation form.

use std::sync::Arc;

use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::ObjectStore;
use wayfarer_client::ObjectStoreStager;
use wayfarer_core::form::AdventureDraft;
use wayfarer_core::store::AssetStager;
use wayfarer_core::{
    Asset, AssetSource, CatalogKind, CreationForm, Draft, DraftDetails, ItemDetails, MemoryStore,
};

fn stager() -> (Arc<InMemory>, ObjectStoreStager) {
    let memory = Arc::new(InMemory::new());
    let stager = ObjectStoreStager::new(memory.clone(), "https://cdn.example/");
    (memory, stager)
}

#[tokio::test]
async fn test_stage_writes_object_and_returns_public_url() {
    let (memory, stager) = stager();
    let asset = Asset::new("lake.jpg", vec![5u8; 10]);

    let staged = stager.stage("gallery", &asset).await.unwrap();

    assert!(staged.object_name.ends_with("-lake.jpg"));
    assert_eq!(
        staged.url,
        format!("https://cdn.example/gallery/{}", staged.object_name)
    );

    let location = Path::from(format!("gallery/{}", staged.object_name));
    let stored = memory.get(&location).await.unwrap().bytes().await.unwrap();
    assert_eq!(stored.as_ref(), asset.bytes.as_ref());
}

#[tokio::test]
async fn test_stage_never_overwrites() {
    let (memory, stager) = stager();
    let asset = Asset::new("lake.jpg", vec![5u8; 10]);
    let staged = stager.stage("gallery", &asset).await.unwrap();

    // A second put at the same location must be refused.
    let location = Path::from(format!("gallery/{}", staged.object_name));
    let options = object_store::PutOptions {
        mode: object_store::PutMode::Create,
        ..Default::default()
    };
    let result = memory
        .put_opts(&location, object_store::PutPayload::from_static(b"other"), options)
        .await;
    assert!(matches!(result, Err(object_store::Error::AlreadyExists { .. })));
}

#[tokio::test]
async fn test_form_stages_into_object_store() {
    let (memory, stager) = stager();
    let store = Arc::new(MemoryStore::new());

    let draft = Draft::new(CatalogKind::Adventure)
        .with_title("Rakaposhi View Point")
        .with_cover(AssetSource::Upload(Asset::new("rakaposhi.jpg", vec![8u8; 20])))
        .with_details(DraftDetails::Adventure(AdventureDraft {
            location: "Nagar".into(),
            video_id: "r4kp0sh1".into(),
            content_images: vec![AssetSource::Upload(Asset::new("road.jpg", vec![2u8; 4]))],
            ..Default::default()
        }));
    let mut form = CreationForm::new(store.clone(), Arc::new(stager), draft);

    let item = form.submit().await.unwrap();

    assert!(item
        .primary_asset
        .starts_with("https://cdn.example/adventures/"));
    match &item.details {
        ItemDetails::Adventure(adventure) => {
            assert!(adventure.content_images[0].ends_with("-road.jpg"));
        }
        other => panic!("unexpected details {:?}", other),
    }

    let listed = memory
        .list_with_delimiter(Some(&Path::from("adventures")))
        .await
        .unwrap();
    assert_eq!(listed.objects.len(), 2);
}
