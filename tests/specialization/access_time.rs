use std::hint::black_box ;
use std::time::Instant ;

use dyn_link::spec_list ;

use crate::dummy::{ self, DoubleGetter, Setter };

const ROUNDS: u32 = 10_000 ;

/// The contract the specialization exists to deliver: for an interface in the
/// view's list, repeated specialized access is strictly cheaper on average
/// than repeated generic access on the same handle.
#[test]
fn specialized_access_is_faster_than_generic_access() {

	let plugin = dummy::shared_library().instantiate( dummy::MULTI_PLUGIN ).unwrap();
	let view = plugin.specialized::<spec_list![ dyn Setter ]>();

	// Touch both paths before timing.
	for _ in 0..100 {
		black_box( view.interface::<dyn Setter>() );
		black_box( plugin.interface::<dyn Setter>() );
	}

	let specialized_start = Instant::now();
	for _ in 0..ROUNDS {
		black_box( view.interface::<dyn Setter>() );
	}
	let specialized_time = specialized_start.elapsed();

	let generic_start = Instant::now();
	for _ in 0..ROUNDS {
		black_box( plugin.interface::<dyn Setter>() );
	}
	let generic_time = generic_start.elapsed();

	println!(
		"avg specialized: {:>8.3} ns, avg generic: {:>8.3} ns",
		specialized_time.as_nanos() as f64 / f64::from( ROUNDS ),
		generic_time.as_nanos() as f64 / f64::from( ROUNDS ),
	);

	assert!(
		specialized_time < generic_time,
		"specialized access ({:?}) must be cheaper than generic access ({:?})",
		specialized_time, generic_time,
	);

	// The timed references are live object views, not stale copies.
	let setter = view.interface::<dyn Setter>().unwrap();
	let getter = plugin.interface::<dyn DoubleGetter>().unwrap();
	setter.set( 11.1 );
	assert!(( getter.get() - 11.1 ).abs() < 1e-8 );

}
