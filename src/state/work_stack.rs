use std::path::PathBuf;
use url::Url;

/// A subforum to archive and the directory its topics go into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    /// Absolute listing URL
    pub url: Url,
    /// Destination directory for this subforum's topics
    pub directory: PathBuf,
}

impl CrawlTarget {
    pub fn new(url: Url, directory: impl Into<PathBuf>) -> Self {
        Self {
            url,
            directory: directory.into(),
        }
    }
}

/// Pending work in the depth-first traversal
#[derive(Debug, Clone)]
pub enum Frame {
    /// Subforum not yet entered
    Enter(CrawlTarget),

    /// Pagination of `target` to resume once nested forums are done
    NextPage {
        target: CrawlTarget,
        next: Url,
        /// Next fallback filename for untitled topics
        untitled: u32,
    },
}

/// LIFO stack of traversal frames
///
/// Nested subforums are pushed above their parent's pagination frame, so a
/// parent's next listing page is only fetched after every nested forum found
/// on the current page has been fully archived.
#[derive(Debug, Default)]
pub struct WorkStack {
    frames: Vec<Frame>,
}

impl WorkStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a stack holding a single subforum to enter
    pub fn with_target(target: CrawlTarget) -> Self {
        Self {
            frames: vec![Frame::Enter(target)],
        }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Pushes nested subforums so they pop in document order
    pub fn push_nested(&mut self, targets: Vec<CrawlTarget>) {
        self.frames
            .extend(targets.into_iter().rev().map(Frame::Enter));
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: u32) -> CrawlTarget {
        let url = Url::parse(&format!("http://b.example/viewforum.php?f={}", id)).unwrap();
        CrawlTarget::new(url, format!("archive/{}", id))
    }

    fn entered_dir(frame: Frame) -> String {
        match frame {
            Frame::Enter(target) => target.directory.display().to_string(),
            other => panic!("unexpected frame {:?}", other),
        }
    }

    #[test]
    fn test_nested_pop_in_document_order() {
        let mut stack = WorkStack::new();
        stack.push_nested(vec![target(1), target(2), target(3)]);

        assert_eq!(entered_dir(stack.pop().unwrap()), "archive/1");
        assert_eq!(entered_dir(stack.pop().unwrap()), "archive/2");
        assert_eq!(entered_dir(stack.pop().unwrap()), "archive/3");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_next_page_waits_for_nested() {
        let parent = target(1);
        let mut stack = WorkStack::new();
        stack.push(Frame::NextPage {
            target: parent.clone(),
            next: parent.url.clone(),
            untitled: 1,
        });
        stack.push_nested(vec![target(2)]);

        assert_eq!(stack.len(), 2);
        assert!(matches!(stack.pop(), Some(Frame::Enter(_))));
        assert!(matches!(stack.pop(), Some(Frame::NextPage { .. })));
    }

    #[test]
    fn test_with_target() {
        let mut stack = WorkStack::with_target(target(7));
        assert_eq!(entered_dir(stack.pop().unwrap()), "archive/7");
        assert!(stack.pop().is_none());
    }
}
