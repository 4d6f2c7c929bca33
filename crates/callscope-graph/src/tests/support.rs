//! Scripted adapter shared by builder and behaviour tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    CallGraphAdapter, CallHierarchyItem, FileSymbol, GraphError, IncomingCall, Location,
    OutgoingCall, Position, Range, SymbolKind,
};

/// Adapter request that can be scripted to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Request {
    Initialize,
    Prepare,
    Outgoing,
    Incoming,
    Shutdown,
}

/// Requests observed by a [`StubAdapter`], shared with the test body.
pub(super) type Journal = Arc<Mutex<Vec<String>>>;

struct Call {
    from: String,
    to: String,
    sites: Vec<Position>,
}

/// Adapter serving a fixed set of functions and calls.
pub(super) struct StubAdapter {
    language: String,
    extension: String,
    items: BTreeMap<String, CallHierarchyItem>,
    files: HashMap<Utf8PathBuf, Vec<(String, bool)>>,
    calls: Vec<Call>,
    failing: Option<Request>,
    journal: Journal,
}

impl StubAdapter {
    pub(super) fn new(language: &str, extension: &str) -> Self {
        Self {
            language: language.to_owned(),
            extension: extension.to_owned(),
            items: BTreeMap::new(),
            files: HashMap::new(),
            calls: Vec::new(),
            failing: None,
            journal: Arc::default(),
        }
    }

    /// Declares a function whose name starts at `line:1` of `path`.
    pub(super) fn function(mut self, name: &str, path: &str, line: u32) -> Self {
        let location = Location::new(path, Position::new(line, 1));
        let item = CallHierarchyItem::new(name, SymbolKind::Function, location)
            .with_detail(format!("function {name}(): void"));
        self.items.insert(name.to_owned(), item);
        self
    }

    /// Lists `name` among the symbols of its file.
    pub(super) fn declared(mut self, name: &str, exported: bool) -> Self {
        let path = self.item(name).selection_location.file_path.clone();
        self.files
            .entry(path)
            .or_default()
            .push((name.to_owned(), exported));
        self
    }

    /// Records calls from `from` to `to` at each of `lines`.
    pub(super) fn calls(mut self, from: &str, to: &str, lines: &[u32]) -> Self {
        self.calls.push(Call {
            from: from.to_owned(),
            to: to.to_owned(),
            sites: lines.iter().map(|line| Position::new(*line, 5)).collect(),
        });
        self
    }

    pub(super) const fn failing_on(mut self, request: Request) -> Self {
        self.failing = Some(request);
        self
    }

    pub(super) fn journal(&self) -> Journal {
        Arc::clone(&self.journal)
    }

    pub(super) fn item(&self, name: &str) -> &CallHierarchyItem {
        self.items
            .get(name)
            .unwrap_or_else(|| panic!("unknown stub function {name}"))
    }

    fn record(&self, request: Request, detail: &str) -> Result<(), GraphError> {
        self.journal
            .lock()
            .expect("journal lock")
            .push(format!("{request:?} {detail}").trim_end().to_owned());
        if self.failing == Some(request) {
            return Err(GraphError::adapter(
                &self.language,
                format!("{request:?} failed"),
            ));
        }
        Ok(())
    }

    fn ranges(sites: &[Position]) -> Vec<Range> {
        sites.iter().map(|site| Range::new(*site, *site)).collect()
    }
}

pub(super) fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().expect("journal lock").clone()
}

#[async_trait]
impl CallGraphAdapter for StubAdapter {
    fn language(&self) -> &str {
        &self.language
    }

    fn supports_file(&self, path: &Utf8Path) -> bool {
        path.extension() == Some(self.extension.as_str())
    }

    async fn initialize(&mut self, root_path: &Utf8Path) -> Result<(), GraphError> {
        self.record(Request::Initialize, root_path.as_str())
    }

    async fn shutdown(&mut self) -> Result<(), GraphError> {
        self.record(Request::Shutdown, "")
    }

    async fn prepare_call_hierarchy(
        &mut self,
        path: &Utf8Path,
        position: Position,
    ) -> Result<Option<CallHierarchyItem>, GraphError> {
        self.record(Request::Prepare, &format!("{path}:{}", position.line))?;
        Ok(self
            .items
            .values()
            .find(|item| {
                item.selection_location.file_path == path
                    && item.selection_location.position() == position
            })
            .cloned())
    }

    async fn file_symbols(&mut self, path: &Utf8Path) -> Result<Vec<FileSymbol>, GraphError> {
        let declared = self.files.get(path).cloned().unwrap_or_default();
        Ok(declared
            .iter()
            .map(|(name, exported)| {
                FileSymbol::new(self.item(name).to_node(&self.language), *exported)
            })
            .collect())
    }

    async fn outgoing_calls(
        &mut self,
        item: &CallHierarchyItem,
    ) -> Result<Vec<OutgoingCall>, GraphError> {
        self.record(Request::Outgoing, &item.name)?;
        Ok(self
            .calls
            .iter()
            .filter(|call| call.from == item.name)
            .map(|call| OutgoingCall {
                to: self.item(&call.to).clone(),
                from_ranges: Self::ranges(&call.sites),
            })
            .collect())
    }

    async fn incoming_calls(
        &mut self,
        item: &CallHierarchyItem,
    ) -> Result<Vec<IncomingCall>, GraphError> {
        self.record(Request::Incoming, &item.name)?;
        Ok(self
            .calls
            .iter()
            .filter(|call| call.to == item.name)
            .map(|call| IncomingCall {
                from: self.item(&call.from).clone(),
                from_ranges: Self::ranges(&call.sites),
            })
            .collect())
    }
}

/// Pinpoint entry naming the stub function `name`.
pub(super) fn pinpoint(adapter: &StubAdapter, name: &str) -> String {
    let location = &adapter.item(name).selection_location;
    format!(
        "{}:{}:{}",
        location.file_path, location.line, location.column
    )
}
