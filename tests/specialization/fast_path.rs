use dyn_link::spec_list ;

use crate::dummy::{ self, DoubleGetter, IntGetter, Setter };

type FastInterfaces = spec_list![ dyn Setter, dyn DoubleGetter ];

#[test]
fn listed_interfaces_resolve_to_the_same_object_as_the_generic_path() {

	let plugin = dummy::shared_library().instantiate( dummy::MULTI_PLUGIN ).unwrap();
	let view = plugin.specialized::<FastInterfaces>();

	let specialized = view.interface::<dyn Setter>().unwrap();
	let generic = plugin.interface::<dyn Setter>().unwrap();
	assert!( std::ptr::addr_eq( specialized, generic ));

	let specialized = view.interface::<dyn DoubleGetter>().unwrap();
	let generic = plugin.interface::<dyn DoubleGetter>().unwrap();
	assert!( std::ptr::addr_eq( specialized, generic ));

}

#[test]
fn the_view_borrows_without_consuming_the_handle() {

	let plugin = dummy::shared_library().instantiate( dummy::MULTI_PLUGIN ).unwrap();
	let view = plugin.specialized::<FastInterfaces>();

	// Generic access on the wrapped handle stays available through the view.
	assert!( view.handle().interface::<dyn IntGetter>().is_some() );
	assert_eq!( view.handle().class_name(), dummy::MULTI_PLUGIN );

	// And on the handle directly, while the view is alive.
	assert!( plugin.interface::<dyn Setter>().is_some() );
	drop( view );
	assert!( plugin.interface::<dyn Setter>().is_some() );

}
