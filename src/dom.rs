//! A small in-memory document: just enough of a page for the watcher to read
//! an input element and write into a results container without a browser.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use tokio::sync::watch;

use crate::errors::SelectorError;

pub type KeyUpListener = Arc<dyn Fn() + Send + Sync>;

pub struct Element {
    id: String,
    value: RwLock<String>,
    dataset: RwLock<HashMap<String, String>>,
    inner_html: watch::Sender<String>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        let (inner_html, _) = watch::channel(String::new());
        Self {
            id: id.into(),
            value: RwLock::new(String::new()),
            dataset: RwLock::new(HashMap::new()),
            inner_html,
        }
    }

    /// Sets a `data-*` attribute, `key` given without the `data-` prefix.
    pub fn with_data(self, key: &str, value: &str) -> Self {
        self.set_data(key, value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> String {
        read(&self.value).clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *write(&self.value) = value.into();
    }

    pub fn data(&self, key: &str) -> Option<String> {
        read(&self.dataset).get(key).cloned()
    }

    pub fn set_data(&self, key: &str, value: &str) {
        write(&self.dataset).insert(key.to_string(), value.to_string());
    }

    pub fn remove_data(&self, key: &str) {
        write(&self.dataset).remove(key);
    }

    pub fn inner_html(&self) -> String {
        self.inner_html.borrow().clone()
    }

    /// Replaces the whole content of the element.
    pub fn set_inner_html(&self, html: impl Into<String>) {
        self.inner_html.send_replace(html.into());
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.inner_html.subscribe()
    }
}

#[derive(Default)]
pub struct Document {
    elements: HashMap<String, Arc<Element>>,
    key_up_listeners: RwLock<HashMap<String, Vec<KeyUpListener>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.insert(element.id().to_string(), Arc::new(element));
        self
    }

    /// Resolves an `#id` selector.
    pub fn select(&self, selector: &str) -> Result<Arc<Element>, SelectorError> {
        let id = selector
            .strip_prefix('#')
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SelectorError::Unsupported(selector.to_string()))?;

        self.elements
            .get(id)
            .cloned()
            .ok_or_else(|| SelectorError::NotFound(selector.to_string()))
    }

    pub fn on_key_up(&self, selector: &str, listener: KeyUpListener) -> Result<(), SelectorError> {
        let element = self.select(selector)?;
        write(&self.key_up_listeners)
            .entry(element.id().to_string())
            .or_default()
            .push(listener);
        Ok(())
    }

    /// Fires a key release on the element. Returns how many listeners ran.
    pub fn key_up(&self, selector: &str) -> Result<usize, SelectorError> {
        let element = self.select(selector)?;
        let listeners = read(&self.key_up_listeners)
            .get(element.id())
            .cloned()
            .unwrap_or_default();

        for listener in &listeners {
            listener();
        }

        Ok(listeners.len())
    }

    /// Types `text` at the end of the element's value, one key release per
    /// character.
    pub fn type_text(&self, selector: &str, text: &str) -> Result<(), SelectorError> {
        let element = self.select(selector)?;
        for c in text.chars() {
            let mut value = element.value();
            value.push(c);
            element.set_value(value);
            self.key_up(selector)?;
        }

        Ok(())
    }
}

// Poisoned locks are recovered; element state stays readable after a listener panics.
fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
