//! In-memory hosts for unit tests
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::HostError;
use crate::host::{PageSurface, PreferenceStore, TabHost, VisualMarker};
use crate::icons::IconSet;
use crate::messages::ExtensionMessage;
use crate::storage::PreferenceMap;
use crate::tab_data::{TabId, TabInfo};

/// Pending once, then ready: lets a second future run mid-operation.
#[derive(Default)]
struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

pub fn prefs(entries: &[(&str, bool)]) -> PreferenceMap {
    entries
        .iter()
        .map(|(domain, enabled)| (domain.to_string(), *enabled))
        .collect()
}

#[derive(Default)]
pub struct FakeStore {
    pub prefs: RefCell<PreferenceMap>,
    pub loads: Cell<usize>,
    pub saves: RefCell<Vec<PreferenceMap>>,
    pub fail_load: Cell<bool>,
    pub fail_save: Cell<bool>,
    pub yield_on_load: Cell<bool>,
    pub yield_on_save: Cell<bool>,
}

impl FakeStore {
    pub fn with(entries: &[(&str, bool)]) -> Self {
        FakeStore {
            prefs: RefCell::new(prefs(entries)),
            ..Default::default()
        }
    }

    pub fn stored(&self) -> PreferenceMap {
        self.prefs.borrow().clone()
    }
}

impl PreferenceStore for FakeStore {
    async fn load(&self) -> Result<PreferenceMap, HostError> {
        self.loads.set(self.loads.get() + 1);
        if self.yield_on_load.get() {
            YieldNow::default().await;
        }
        if self.fail_load.get() {
            return Err(HostError::Storage("quota exceeded".to_string()));
        }
        Ok(self.stored())
    }

    async fn save(&self, prefs: &PreferenceMap) -> Result<(), HostError> {
        if self.yield_on_save.get() {
            YieldNow::default().await;
        }
        if self.fail_save.get() {
            return Err(HostError::Storage("write rejected".to_string()));
        }
        self.prefs.replace(prefs.clone());
        self.saves.borrow_mut().push(prefs.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeTabs {
    pub open: RefCell<Vec<TabInfo>>,
    pub closed: RefCell<Vec<TabId>>,
    pub without_listener: RefCell<Vec<TabId>>,
    pub icons: RefCell<Vec<(TabId, IconSet)>>,
    pub messages: RefCell<Vec<(TabId, ExtensionMessage)>>,
    pub fail_query: Cell<bool>,
}

impl FakeTabs {
    pub fn with(tabs: Vec<TabInfo>) -> Self {
        FakeTabs {
            open: RefCell::new(tabs),
            ..Default::default()
        }
    }

    pub fn close(&self, tab_id: TabId) {
        self.closed.borrow_mut().push(tab_id);
    }

    pub fn last_icon(&self, tab_id: TabId) -> Option<IconSet> {
        self.icons
            .borrow()
            .iter()
            .rev()
            .find(|(id, _)| *id == tab_id)
            .map(|(_, icon)| *icon)
    }

    fn is_closed(&self, tab_id: TabId) -> bool {
        self.closed.borrow().contains(&tab_id)
    }
}

impl TabHost for FakeTabs {
    async fn set_icon(&self, tab_id: TabId, icon: IconSet) -> Result<(), HostError> {
        if self.is_closed(tab_id) {
            return Err(HostError::StaleTab(tab_id));
        }
        self.icons.borrow_mut().push((tab_id, icon));
        Ok(())
    }

    async fn send_message(&self, tab_id: TabId, message: &ExtensionMessage) -> Result<(), HostError> {
        if self.is_closed(tab_id) || self.without_listener.borrow().contains(&tab_id) {
            return Err(HostError::Messaging {
                tab_id,
                reason: "Receiving end does not exist.".to_string(),
            });
        }
        self.messages.borrow_mut().push((tab_id, *message));
        Ok(())
    }

    async fn query_tabs(&self) -> Result<Vec<TabInfo>, HostError> {
        if self.fail_query.get() {
            return Err(HostError::Decode("tabs.query rejected".to_string()));
        }
        Ok(self.open.borrow().clone())
    }

    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, HostError> {
        if self.is_closed(tab_id) {
            return Err(HostError::StaleTab(tab_id));
        }
        self.open
            .borrow()
            .iter()
            .find(|tab| tab.id == Some(tab_id))
            .cloned()
            .ok_or(HostError::StaleTab(tab_id))
    }
}

/// Records every write it receives.
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub attached: bool,
    pub marker: Option<VisualMarker>,
    pub mutations: usize,
    pub fail_attach: bool,
}

impl PageSurface for FakeSurface {
    fn style_attached(&self) -> bool {
        self.attached
    }

    fn attach_style(&mut self) -> Result<(), HostError> {
        if self.fail_attach {
            return Err(HostError::Document("adoptedStyleSheets is frozen".to_string()));
        }
        self.attached = true;
        self.mutations += 1;
        Ok(())
    }

    fn detach_style(&mut self) -> Result<(), HostError> {
        self.attached = false;
        self.mutations += 1;
        Ok(())
    }

    fn set_marker(&mut self, marker: VisualMarker) -> Result<(), HostError> {
        self.marker = Some(marker);
        self.mutations += 1;
        Ok(())
    }
}
