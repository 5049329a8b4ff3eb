use std::path::Path;

use err_derive::Error;
use log::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Error)]
pub enum Error {
    #[error(display = "storage: {}", _0)]
    Store(#[error(from)] sled::Error),
    #[error(display = "encoding: {}", _0)]
    Encoding(#[error(from)] serde_json::Error),
}

/// A key-value document store: one JSON-encoded value per string key.
#[derive(Debug, Clone)]
pub struct Store {
    db: sled::Db,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let db = sled::open(path.as_ref())?;
        Ok(Store { db })
    }

    /// A throwaway store backed by a temporary database, for tests.
    pub fn temporary() -> Result<Self, Error> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Store { db })
    }

    pub fn save<D: Serialize>(&self, key: &str, document: &D) -> Result<(), Error> {
        let json = serde_json::to_vec(document)?;
        self.db.insert(key, json)?;
        self.db.flush()?;
        debug!("Saved document under {:?}", key);
        Ok(())
    }

    pub fn load<D: DeserializeOwned>(&self, key: &str) -> Result<Option<D>, Error> {
        match self.db.get(key)? {
            Some(bytes) => {
                let doc = serde_json::from_slice(&bytes)?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    pub fn delete(&self, key: &str) -> Result<(), Error> {
        self.db.remove(key)?;
        self.db.flush()?;
        debug!("Deleted document under {:?}", key);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Default)]
    struct ADocument {
        name: String,
    }

    #[test]
    fn load_missing_document_should_return_none() {
        env_logger::try_init().unwrap_or_default();
        let store = Store::temporary().expect("temporary store");

        let loaded = store.load::<ADocument>("nonesuch").expect("load");
        info!("Loaded document: {:?}", loaded);

        assert_eq!(None, loaded);
    }

    #[test]
    fn save_load() {
        env_logger::try_init().unwrap_or_default();
        let store = Store::temporary().expect("temporary store");

        let some_doc = ADocument {
            name: "Dave".to_string(),
        };

        info!("Original document: {:?}", some_doc);

        // Ensure we don't accidentally "find" the document by virtue of it
        // being the only one in the store.
        for i in 0..4 {
            store
                .save(&format!("padding/{}", i), &ADocument {
                    name: format!("{:x}", i * 0x1234_5678),
                })
                .expect("save");
        }
        store.save("target", &some_doc).expect("save");

        let loaded = store.load("target").expect("load");
        info!("Loaded document: {:?}", loaded);

        assert_eq!(Some(some_doc), loaded);
    }

    #[test]
    fn should_update_on_overwrite() {
        env_logger::try_init().unwrap_or_default();
        let store = Store::temporary().expect("temporary store");

        store
            .save("target", &ADocument {
                name: "Version 1".to_string(),
            })
            .expect("save original");
        store
            .save("target", &ADocument {
                name: "Version 2".to_string(),
            })
            .expect("save modified");

        let loaded = store.load::<ADocument>("target").expect("load");
        assert_eq!(Some("Version 2".to_string()), loaded.map(|d| d.name));
    }

    #[test]
    fn delete_then_load_should_return_none() {
        env_logger::try_init().unwrap_or_default();
        let store = Store::temporary().expect("temporary store");

        store
            .save("target", &ADocument {
                name: "Dummy".to_string(),
            })
            .expect("save");
        store.delete("target").expect("delete");

        let loaded = store.load::<ADocument>("target").expect("load");
        assert_eq!(None, loaded);
    }

    #[test]
    fn delete_of_missing_key_is_a_noop() {
        env_logger::try_init().unwrap_or_default();
        let store = Store::temporary().expect("temporary store");

        store.delete("nonesuch").expect("delete");
    }

    #[test]
    fn mistyped_document_should_surface_encoding_error() {
        env_logger::try_init().unwrap_or_default();
        let store = Store::temporary().expect("temporary store");

        store.save("target", &"not an ADocument").expect("save");

        let err = store
            .load::<ADocument>("target")
            .expect_err("load should fail");
        match err {
            Error::Encoding(_) => (),
            other => panic!("Expected an encoding error; got {:?}", other),
        }
    }
}
