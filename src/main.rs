fn main() {
    if let Err(e) = library_portal::run() {
        web_sys::console::error_1(&e);
    }
}
