/// The in-flight value of a resolution: one handle or an ordered list of handles.
///
/// Lists are never nested; fanning out over a list flattens one level. Order is
/// the driver's document order and every filter preserves it.
#[derive(Debug, Clone, PartialEq)]
pub enum Scope<E> {
    One(E),
    Many(Vec<E>),
}

impl<E> Scope<E> {
    pub fn is_many(&self) -> bool {
        matches!(self, Scope::Many(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Scope::One(_) => 1,
            Scope::Many(elements) => elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_one(&self) -> Option<&E> {
        match self {
            Scope::One(element) => Some(element),
            Scope::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[E]> {
        match self {
            Scope::One(_) => None,
            Scope::Many(elements) => Some(elements),
        }
    }

    pub fn into_vec(self) -> Vec<E> {
        match self {
            Scope::One(element) => vec![element],
            Scope::Many(elements) => elements,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        match self {
            Scope::One(element) => std::slice::from_ref(element).iter(),
            Scope::Many(elements) => elements.iter(),
        }
    }
}

impl<E> From<Vec<E>> for Scope<E> {
    fn from(elements: Vec<E>) -> Self {
        Scope::Many(elements)
    }
}
