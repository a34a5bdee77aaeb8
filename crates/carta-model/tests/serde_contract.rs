// SPDX-License-Identifier: Apache-2.0

use carta_model::{Catalog, CategoryId, ItemId};

const FIXTURE: &str = r#"{
  "categories": [
    { "id": "corbalar", "name": "Çorbalar", "slug": "corbalar", "order": 1 },
    { "id": "et", "name": "Et Yemekleri", "slug": "et-yemekleri", "order": 2 }
  ],
  "items": [
    {
      "id": "item-1700000000000",
      "name": "Mercimek Çorbası",
      "description": "Sıcak servis edilir",
      "price": 80,
      "image": "/menu-images/1700000000000-mercimek.jpg",
      "tags": ["Popüler"],
      "category": "corbalar",
      "available": true
    },
    {
      "id": "item-1700000000001",
      "name": "Adana Kebap",
      "description": "Acılı, el yapımı",
      "price": 320,
      "image": "/menu-images/placeholder.jpg",
      "tags": ["Acılı", "Popüler"],
      "category": "et",
      "available": false
    }
  ]
}"#;

#[test]
fn fixture_document_round_trips() {
    let catalog: Catalog = serde_json::from_str(FIXTURE).expect("parse fixture");
    assert_eq!(catalog.categories.len(), 2);
    assert_eq!(catalog.items.len(), 2);
    assert_eq!(catalog.items[0].price, 80);
    assert_eq!(catalog.items[1].category, CategoryId::new("et"));
    assert!(!catalog.items[1].available);

    let serialized = serde_json::to_string_pretty(&catalog).expect("serialize");
    let reparsed: Catalog = serde_json::from_str(&serialized).expect("reparse");
    assert_eq!(catalog, reparsed);
}

#[test]
fn category_order_defaults_when_absent() {
    // The legacy admin client wrote new categories without an order field.
    let raw = r#"{
      "categories": [{ "id": "tatlilar", "name": "Tatlılar", "slug": "tatlilar" }],
      "items": []
    }"#;
    let catalog: Catalog = serde_json::from_str(raw).expect("parse");
    assert_eq!(catalog.categories[0].order, 0);
}

#[test]
fn unknown_fields_are_ignored() {
    let raw = r#"{
      "categories": [],
      "items": [
        {
          "id": "item-1",
          "name": "Ayran",
          "description": "Soğuk",
          "price": 30,
          "image": "/menu-images/ayran.jpg",
          "tags": [],
          "category": "icecekler",
          "available": true,
          "legacyField": "kept by older clients"
        }
      ],
      "updatedAt": "2024-01-01"
    }"#;
    let catalog: Catalog = serde_json::from_str(raw).expect("parse superset document");
    assert_eq!(catalog.items[0].id, ItemId::new("item-1"));
}

#[test]
fn ids_serialize_transparently() {
    let id = ItemId::new("item-42");
    assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"item-42\"");
    let back: ItemId = serde_json::from_str("\"item-42\"").expect("deserialize");
    assert_eq!(back, id);
}
