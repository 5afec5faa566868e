use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn load_all<T: Clone>(collection: &Mutex<Vec<T>>) -> Vec<T> {
    match collection.lock() {
        Ok(collection) => collection.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn replace_all<T: Clone>(values: &[T], collection: &Mutex<Vec<T>>) {
    let mut collection = match collection.lock() {
        Ok(collection) => collection,
        Err(poisoned) => poisoned.into_inner(),
    };
    *collection = values.to_vec();
}
