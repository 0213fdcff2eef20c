//! A small hand-built database shared by the engine tests.

use symbol_db::{Category, Database, DatabaseBuilder, SymbolEntry};

pub(crate) fn sample_database() -> Database {
    let animals = Category::new("animals");
    let nature = Category::new("nature");
    let celebrations = Category::new("celebrations");
    let cat_faces = Category::internal("cat_faces");

    DatabaseBuilder::new()
        .with_entry(SymbolEntry::new("🐶", "dog face", animals.clone()))
        .with_similarity_keywords("🐶", ["dog", "pet"])
        .with_entry(SymbolEntry::new("🐕", "dog", animals.clone()).with_keyword("pet"))
        .with_similarity_keywords("🐕", ["dog", "pet"])
        .with_entry(SymbolEntry::new("🐩", "poodle", animals.clone()))
        .with_similarity_keywords("🐩", ["dog"])
        .with_entry(SymbolEntry::new("🐈", "cat", animals.clone()))
        .with_similarity_keywords("🐈", ["cat", "pet"])
        .with_entry(SymbolEntry::new("🐎", "horse", animals.clone()).with_name("racehorse"))
        .with_entry(SymbolEntry::new("🐄", "cow", animals.clone()))
        .with_similarity_keywords("🐄", ["farm"])
        .with_entry(SymbolEntry::new("🐖", "pig", animals))
        .with_similarity_keywords("🐖", ["farm"])
        .with_entry(SymbolEntry::new("🌸", "cherry blossom", nature.clone()))
        .with_similarity_keywords("🌸", ["blossom", "flower"])
        .with_entry(SymbolEntry::new("🌹", "rose", nature.clone()))
        .with_similarity_keywords("🌹", ["flower"])
        .with_entry(SymbolEntry::new("🌷", "tulip", nature.clone()))
        .with_similarity_keywords("🌷", ["flower"])
        .with_entry(SymbolEntry::new("🌵", "cactus", nature.clone()))
        .with_similarity_keywords("🌵", ["desert"])
        .with_entry(SymbolEntry::new("🌴", "palm tree", nature.clone()))
        .with_similarity_keywords("🌴", ["tree"])
        .with_entry(SymbolEntry::new("🍀", "four leaf clover", nature))
        .with_similarity_keywords("🍀", ["luck"])
        .with_entry(SymbolEntry::new("🎃", "jack-o-lantern", celebrations.clone()))
        .with_similarity_keywords("🎃", ["halloween"])
        .with_entry(SymbolEntry::new("🎄", "christmas tree", celebrations))
        .with_similarity_keywords("🎄", ["christmas", "tree"])
        .with_entry(SymbolEntry::new("😺", "grinning cat", cat_faces))
        .with_similarity_keywords("😺", ["cat", "face"])
        .build()
        .expect("fixture database is valid")
}
