pub mod driver;
pub mod webdriver;

pub use webdriver::WebDriverClient;
