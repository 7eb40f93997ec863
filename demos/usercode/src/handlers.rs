// Route handlers, called with the record's parameter
pub fn set(param: &str) {
    match param.split_once('=') {
        Some((key, value)) => println!("set: {} <- {}", key.trim(), value.trim()),
        None => println!("set: expected KEY=VALUE, got '{}'", param),
    }
}

pub fn get(param: &str) {
    println!("get: {}", param);
}

pub fn led(param: &str) {
    match param {
        "on" | "1" => println!("led: on"),
        "off" | "0" => println!("led: off"),
        _ => println!("led: unknown state '{}'", param),
    }
}

pub fn ping(param: &str) {
    if param.is_empty() {
        println!("pong");
    } else {
        println!("pong {}", param);
    }
}

pub fn status(_param: &str) {
    println!("status: ok");
}
