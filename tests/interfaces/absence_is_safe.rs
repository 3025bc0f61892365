use dyn_link::spec_list ;

use crate::dummy::{ self, NameGetter, Setter };

#[test]
fn absent_interface_is_none_on_the_generic_path() {

	let library = dummy::shared_library();

	let multi = library.instantiate( dummy::MULTI_PLUGIN ).unwrap();
	assert!( multi.interface::<dyn NameGetter>().is_none() );
	assert!( multi.interface_by_name( "dummy::NameGetter" ).is_none() );

	let single = library.instantiate( dummy::SINGLE_PLUGIN ).unwrap();
	assert!( single.interface::<dyn Setter>().is_none() );
	assert!( single.interface::<dyn NameGetter>().is_some() );

}

#[test]
fn absent_interface_is_none_on_the_specialized_path() {

	let plugin = dummy::shared_library().instantiate( dummy::MULTI_PLUGIN ).unwrap();

	// Listed but not implemented: empty slot, exactly like the generic path.
	let view = plugin.specialized::<spec_list![ dyn NameGetter, dyn Setter ]>();
	assert!( view.interface::<dyn NameGetter>().is_none() );
	assert!( view.interface::<dyn Setter>().is_some() );

}

#[test]
fn repeated_absent_lookups_stay_empty() {
	let plugin = dummy::shared_library().instantiate( dummy::SINGLE_PLUGIN ).unwrap();
	for _ in 0..100 {
		assert!( plugin.interface::<dyn Setter>().is_none() );
	}
}
