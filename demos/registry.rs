use log::info;
use primetable::{logging::init_logger, Registry};

fn main() {
    init_logger();

    let mut registry = Registry::new();

    println!("{}", registry.add_student(1001, "Ada Lovelace", 20, "Mathematics"));
    println!("{}", registry.add_student(1002, "Alan Turing", 22, "Computer Science"));
    println!("{}", registry.add_student(1003, "Grace Hopper", 21, "Compilers"));

    println!("{}", registry.find_student(1002));
    println!("{}", registry.update_student(1002, None, Some(23), None));
    println!("{}", registry.find_student(1002));
    println!("{}", registry.update_student(9999, Some("Nobody".into()), None, None));

    println!("{}", registry.remove_student(1001));
    println!("{}", registry.remove_student(1001));

    println!("{}", registry.list_all_students());

    let table = registry.table();
    info!(
        "{} students in {} slots ({} tombstones)",
        table.len(),
        table.capacity(),
        table.tombstones()
    );
}
