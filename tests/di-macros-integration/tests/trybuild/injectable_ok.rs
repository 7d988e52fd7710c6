use di_abstractions::Destination;
use di_macros::Injectable;

#[derive(Clone, Default)]
struct Clock;

#[derive(Default, Injectable)]
struct Scheduler {
    clock: Clock,
    #[inject(skip)]
    ticks: u64,
}

fn main() {
    let scheduler = Scheduler::default();
    assert_eq!(scheduler.shape().len(), 1);
    assert_eq!(scheduler.ticks, 0);
}
