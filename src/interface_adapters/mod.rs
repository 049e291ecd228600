// Interface adapters: wire protocol, backend client and the page document.

pub mod clients;
pub mod console;
pub mod page;
pub mod protocol;
