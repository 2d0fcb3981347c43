//! Navigation outcomes signalled by the controllers

use std::fmt;

/// Where the application should go next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The product list
    List,
    /// A blank create form
    CreateForm,
    /// The edit form for a product id
    EditForm(String),
}

impl Navigation {
    /// Conventional route path for this destination
    pub fn path(&self) -> String {
        match self {
            Navigation::List => "/list".to_string(),
            Navigation::CreateForm => "/".to_string(),
            Navigation::EditForm(id) => format!("/edit/{}", id),
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
