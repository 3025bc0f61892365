use dyn_link::spec_list ;

use crate::dummy::{ self, DoubleGetter, Setter };

/// Slots are populated exclusively through `Plugin::specialized`, which ties
/// them to the plugin borrow for the view's whole lifetime; no public
/// constructor can detach them. Churn the heap while a view is live to show
/// slot reads keep resolving into the owned instance, never into recycled
/// memory.
#[test]
fn slots_track_the_owned_instance_for_the_views_whole_lifetime() {

	let plugin = {
		let library = dummy::library();
		library.instantiate( dummy::MULTI_PLUGIN ).unwrap()
		// The library handle is gone; the instance alone keeps it mapped.
	};

	let view = plugin.specialized::<spec_list![ dyn Setter, dyn DoubleGetter ]>();
	view.interface::<dyn Setter>().unwrap().set( 6.5 );

	let churn: Vec<Vec<u8>> = ( 0..64 ).map(| _ | vec![ 0x41; 4096 ]).collect();
	drop( churn );

	assert_eq!( view.interface::<dyn DoubleGetter>().unwrap().get(), 6.5 );

}
